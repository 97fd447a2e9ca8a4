//! Output-location configuration intake
//!
//! Build steps declare the outputs they publish as a JSON array of
//! `{ "output": "<name>" }` entries. Intake happens once at construction
//! time: entries are parsed into a typed shape, trimmed, sanitized, and
//! counted against the orchestrator's per-action limit. Publish time never
//! sees raw configuration.

use crate::core::error::OutputConfigError;
use serde::{Deserialize, Serialize};

/// Orchestrator limit on output artifacts per action.
pub const MAX_OUTPUT_DECLARATIONS: usize = 5;

/// Characters allowed in an output path/artifact name. Everything else is
/// stripped during sanitization.
fn is_safe_output_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-' | '/')
}

/// Raw shape of one configured output-location entry.
#[derive(Debug, Deserialize)]
struct OutputLocationEntry {
    #[serde(default)]
    output: Option<String>,
}

/// One user-configured build output, sanitized at construction and
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDeclaration(String);

impl OutputDeclaration {
    /// Sanitized output path/name.
    pub fn output(&self) -> &str {
        &self.0
    }

    /// Parse the configured output locations from their JSON form.
    ///
    /// Entries with an absent or empty `output` value are discarded;
    /// entries with the wrong shape fail the whole parse. The resulting
    /// count must not exceed [`MAX_OUTPUT_DECLARATIONS`].
    pub fn parse_locations(
        raw: &serde_json::Value,
    ) -> Result<Vec<OutputDeclaration>, OutputConfigError> {
        let entries: Vec<OutputLocationEntry> = serde_json::from_value(raw.clone())
            .map_err(|e| OutputConfigError::MalformedEntry {
                message: e.to_string(),
            })?;

        let declarations: Vec<OutputDeclaration> = entries
            .into_iter()
            .filter_map(|entry| entry.output)
            .map(|output| sanitize(output.trim()))
            .filter(|output| !output.is_empty())
            .map(OutputDeclaration)
            .collect();

        if declarations.len() > MAX_OUTPUT_DECLARATIONS {
            return Err(OutputConfigError::TooManyOutputs {
                configured: declarations.len(),
                max: MAX_OUTPUT_DECLARATIONS,
            });
        }

        Ok(declarations)
    }
}

/// Strip characters unsafe for a path or artifact name.
fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| is_safe_output_char(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_declared_outputs_in_order() {
        let raw = json!([
            { "output": "target/release/app" },
            { "output": "docs" },
        ]);

        let declarations = OutputDeclaration::parse_locations(&raw).unwrap();
        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0].output(), "target/release/app");
        assert_eq!(declarations[1].output(), "docs");
    }

    #[test]
    fn test_parse_trims_and_sanitizes() {
        let raw = json!([{ "output": "  build;rm -rf$(x)/out  " }]);

        let declarations = OutputDeclaration::parse_locations(&raw).unwrap();
        assert_eq!(declarations[0].output(), "buildrm -rfx/out");
    }

    #[test]
    fn test_parse_discards_absent_and_empty_entries() {
        let raw = json!([
            { "output": "dist" },
            { "output": "" },
            { "output": "   " },
            {},
        ]);

        let declarations = OutputDeclaration::parse_locations(&raw).unwrap();
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].output(), "dist");
    }

    #[test]
    fn test_parse_fails_fast_on_malformed_entry() {
        let raw = json!([{ "output": 42 }]);

        let error = OutputDeclaration::parse_locations(&raw).unwrap_err();
        assert!(matches!(error, OutputConfigError::MalformedEntry { .. }));
    }

    #[test]
    fn test_parse_rejects_too_many_outputs() {
        let entries: Vec<_> = (0..MAX_OUTPUT_DECLARATIONS + 1)
            .map(|i| json!({ "output": format!("out-{i}") }))
            .collect();
        let raw = serde_json::Value::Array(entries);

        let error = OutputDeclaration::parse_locations(&raw).unwrap_err();
        assert_eq!(
            error,
            OutputConfigError::TooManyOutputs {
                configured: MAX_OUTPUT_DECLARATIONS + 1,
                max: MAX_OUTPUT_DECLARATIONS,
            }
        );
    }

    #[test]
    fn test_parse_accepts_empty_list() {
        let raw = json!([]);

        let declarations = OutputDeclaration::parse_locations(&raw).unwrap();
        assert!(declarations.is_empty());
    }
}
