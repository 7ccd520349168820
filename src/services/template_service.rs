use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Templates compiled into the binary, by name.
const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[("testing", include_str!("../../templates/testing.html"))];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Embedded template '{0}' not found")]
    NotFound(String),
}

/// Loads embedded HTML templates and fills in `{{Key}}` placeholders.
#[derive(Debug, Default)]
pub struct TemplateService {
    cache: RwLock<HashMap<String, Arc<str>>>,
}

impl TemplateService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_template(&self, name: &str) -> Result<Arc<str>, TemplateError> {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(template) = cache.get(name) {
                return Ok(Arc::clone(template));
            }
        }

        let source = EMBEDDED_TEMPLATES
            .iter()
            .find(|(template_name, _)| *template_name == name)
            .map(|(_, source)| *source)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let entry = cache.entry(name.to_string()).or_insert_with(|| Arc::from(source));
        Ok(Arc::clone(entry))
    }

    /// Replaces every `{{Key}}` with its value. Unknown placeholders are left intact.
    pub fn process_template<I, K, V>(&self, template: &str, replacements: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        replacements
            .into_iter()
            .fold(template.to_string(), |result, (key, value)| {
                result.replace(&format!("{{{{{}}}}}", key.as_ref()), value.as_ref())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TemplateService {
        TemplateService::new()
    }

    #[test]
    fn test_simple_replacement() {
        let result = service().process_template(
            "Hello {{Name}}, welcome to {{App}}!",
            [("Name", "John"), ("App", "SignalR Docs")],
        );
        assert_eq!(result, "Hello John, welcome to SignalR Docs!");
    }

    #[test]
    fn test_no_replacements() {
        let template = "Static content without placeholders";
        let result = service().process_template(template, Vec::<(&str, &str)>::new());
        assert_eq!(result, template);
    }

    #[test]
    fn test_missing_placeholder_left_intact() {
        let result = service().process_template(
            "Hello {{Name}}, your {{Status}} is {{Unknown}}",
            [("Name", "Alice"), ("Status", "Active")],
        );
        assert_eq!(result, "Hello Alice, your Active is {{Unknown}}");
    }

    #[test]
    fn test_multiple_occurrences() {
        let result = service().process_template(
            "{{Title}} - {{Title}} Documentation for {{Title}}",
            [("Title", "SignalR")],
        );
        assert_eq!(result, "SignalR - SignalR Documentation for SignalR");
    }

    #[test]
    fn test_special_characters_and_empty_values() {
        let service = service();
        assert_eq!(
            service.process_template("Message: {{Message}}", [("Message", "Special chars: <>&\"'`")]),
            "Message: Special chars: <>&\"'`"
        );
        assert_eq!(service.process_template("Before{{Empty}}After", [("Empty", "")]), "BeforeAfter");
        assert_eq!(
            service.process_template("{{Key1}}{{Key2}}", [("Key", "A"), ("Key1", "A")]),
            "A{{Key2}}"
        );
    }

    #[test]
    fn test_load_embedded_template() {
        let service = service();
        let first = service.load_template("testing").unwrap();
        assert!(first.contains("{{ApiJsonUrl}}"));
        assert!(first.contains("{{SignalRClientUrl}}"));

        let second = service.load_template("testing").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unknown_template() {
        let err = service().load_template("missing").unwrap_err();
        assert_eq!(err, TemplateError::NotFound("missing".to_string()));
    }
}
