use crate::error::{Error, Result};
use crate::syntax::SyntaxNode;

/// Logical name of the active-mutation helper template.
pub const ACTIVE_MUTATION_HELPER: &str = "TreeMutant.ActiveMutationHelper";

static RESOURCES: &[(&str, &str)] = &[(
    ACTIVE_MUTATION_HELPER,
    include_str!("resources/active_mutation_helper.json"),
)];

/// Raw text of an embedded resource.
pub fn load(name: &str) -> Result<&'static str> {
    RESOURCES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, text)| *text)
        .ok_or_else(|| Error::UnknownResource(name.to_string()))
}

/// Parse an embedded resource as a serialized syntax tree.
pub fn load_tree(name: &str) -> Result<SyntaxNode> {
    parse_tree(name, load(name)?)
}

fn parse_tree(name: &str, text: &str) -> Result<SyntaxNode> {
    serde_json::from_str(text).map_err(|source| Error::CorruptResource {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxKind;

    #[test]
    fn helper_template_is_registered() {
        let tree = load_tree(ACTIVE_MUTATION_HELPER).expect("helper template should parse");
        assert_eq!(tree.kind(), SyntaxKind::CompilationUnit);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = load("TreeMutant.Missing").unwrap_err();
        assert!(matches!(err, Error::UnknownResource(ref n) if n == "TreeMutant.Missing"));
    }

    #[test]
    fn corrupt_templates_report_the_resource_name() {
        let err = parse_tree("broken", "{\"kind\": \"NotAKind\"}").unwrap_err();
        assert!(matches!(err, Error::CorruptResource { ref name, .. } if name == "broken"));
        assert_eq!(err.to_string(), "resource `broken` is not a valid syntax tree");
    }
}
