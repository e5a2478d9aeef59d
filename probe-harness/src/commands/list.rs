//! List command implementation

use crate::probe::ProbeSpec;

/// One line per probe: name and expected failure kind
pub fn render_list(specs: &[ProbeSpec]) -> String {
    let width = specs.iter().map(|spec| spec.name().len()).max().unwrap_or(0);
    specs
        .iter()
        .map(|spec| format!("{:<width$}  {}\n", spec.name(), spec.expected_kind(), width = width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::FailureKind;
    use crate::fixtures::standard_probes;

    #[test]
    fn test_render_list_aligns_names() {
        let specs = vec![
            ProbeSpec::new("Short", FailureKind::TypeMismatch, || Ok(())),
            ProbeSpec::new("MuchLonger", FailureKind::MalformedInput, || Ok(())),
        ];
        assert_eq!(
            render_list(&specs),
            "Short       TypeMismatch\nMuchLonger  MalformedInput\n"
        );
    }

    #[test]
    fn test_render_list_standard_probes() {
        let listing = render_list(&standard_probes());
        assert_eq!(listing.lines().count(), 11);
        assert!(listing.contains("DivideByZero"));
        assert!(listing.contains("InvalidComputation"));
    }

    #[test]
    fn test_render_list_empty() {
        assert_eq!(render_list(&[]), "");
    }
}
