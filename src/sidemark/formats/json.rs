//! JSON projection of the parse output

use crate::sidemark::parser::ParseOutput;

/// Serialize the document tree and reference table as pretty JSON.
pub fn to_json(output: &ParseOutput) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(output)
}

/// Serialize to a `serde_json::Value` for programmatic inspection.
pub fn to_json_value(output: &ParseOutput) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidemark::parser::parse_document;

    #[test]
    fn test_json_projection_shape() {
        let output = parse_document("= title\n\nbody with $<k>");
        let value = to_json_value(&output).unwrap();
        assert!(value["document"]["segments"].is_array());
        assert_eq!(value["references"]["order"][0], "k");
    }
}
