/// A curriculum module as loaded from the corpus
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRecord {
    pub id: i64,
    pub name: String,
    pub shortdescription: String,
    /// One or more cities, joined by " en " when a module runs in several places
    pub location: String,
    pub study_credit: i64,
    /// Qualification level code, e.g. "NLQF5"
    pub level: String,
    pub module_tags: Option<String>,
}

impl ModuleRecord {
    /// Text used for matching: name and short description, empty parts skipped
    pub fn raw_text(&self) -> String {
        [self.name.as_str(), self.shortdescription.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Cities this module is offered in, lowercased
    pub fn cities(&self) -> Vec<String> {
        split_cities(&self.location)
    }
}

/// Splits a location string on the " en " conjunction into trimmed, lowercased cities
pub fn split_cities(location: &str) -> Vec<String> {
    location
        .to_lowercase()
        .split(" en ")
        .map(|city| city.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, description: &str) -> ModuleRecord {
        ModuleRecord {
            id: 1,
            name: name.to_string(),
            shortdescription: description.to_string(),
            location: "Den Bosch en Tilburg".to_string(),
            study_credit: 15,
            level: "NLQF5".to_string(),
            module_tags: None,
        }
    }

    #[test]
    fn test_raw_text_joins_name_and_description() {
        let module = record("Data Analytics", "Werken met dashboards");
        assert_eq!(module.raw_text(), "Data Analytics Werken met dashboards");
    }

    #[test]
    fn test_raw_text_skips_empty_parts() {
        assert_eq!(record("", "Alleen beschrijving").raw_text(), "Alleen beschrijving");
        assert_eq!(record("Alleen naam", "").raw_text(), "Alleen naam");
        assert_eq!(record("", "").raw_text(), "");
    }

    #[test]
    fn test_cities_split_on_conjunction() {
        let module = record("x", "y");
        assert_eq!(module.cities(), vec!["den bosch", "tilburg"]);
    }

    #[test]
    fn test_split_cities_single() {
        assert_eq!(split_cities(" Breda "), vec!["breda"]);
    }
}
