//! Which fields a form requires and which values its selects offer.

use crate::model::{Field, Submission};
use fxhash::{FxHashMap, FxHashSet};
use leadform_domain::config::PolicyPreset;

pub const FORMATIONS: [&str; 9] =
    ["MBA-MOS", "MBA-DMK", "BAC-AGA", "EMBA-SNT", "EMBA-SFE", "MS-MAS", "MS-FIN", "MS-RH", "MS-MRK"];
pub const SOURCES: [&str; 3] = ["Meta", "Salon", "Passage"];
pub const LOCATIONS: [&str; 2] = ["Alger", "Constantine"];

/// Required fields plus the ordered option lists of the enumerated fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPolicy {
    required: FxHashSet<Field>,
    choices: FxHashMap<Field, Vec<String>>,
}

impl FormPolicy {
    /// Builds a policy with the stock option lists.
    pub fn new(required: impl IntoIterator<Item = Field>) -> Self {
        let choices = [
            (Field::Formation, &FORMATIONS[..]),
            (Field::Source, &SOURCES[..]),
            (Field::Location, &LOCATIONS[..]),
        ]
        .into_iter()
        .map(|(field, values)| (field, values.iter().map(|v| (*v).to_owned()).collect()))
        .collect();

        Self { required: required.into_iter().collect(), choices }
    }

    /// Name, mobile, source and location must be filled.
    #[must_use]
    pub fn standard() -> Self {
        Self::new([Field::Name, Field::Mobile, Field::Source, Field::Location])
    }

    /// Every field must be filled.
    #[must_use]
    pub fn strict() -> Self {
        Self::new(Field::ALL)
    }

    /// Replaces the options of an enumerated field; an empty list turns it into free text.
    #[must_use]
    pub fn with_choices<I, S>(mut self, field: Field, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.choices.remove(&field);
        } else {
            self.choices.insert(field, values);
        }
        self
    }

    #[must_use]
    pub fn is_required(&self, field: Field) -> bool {
        self.required.contains(&field)
    }

    /// Options of an enumerated field, `None` for free text.
    #[must_use]
    pub fn choices(&self, field: Field) -> Option<&[String]> {
        self.choices.get(&field).map(Vec::as_slice)
    }

    /// Free text accepts anything; enumerated fields accept their options or nothing.
    #[must_use]
    pub fn allows(&self, field: Field, value: &str) -> bool {
        self.choices(field)
            .is_none_or(|options| value.is_empty() || options.iter().any(|option| option == value))
    }

    /// True when every required field holds something other than whitespace.
    #[must_use]
    pub fn is_satisfied_by(&self, submission: &Submission) -> bool {
        self.required.iter().all(|field| !submission.get(*field).trim().is_empty())
    }
}

impl Default for FormPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl From<PolicyPreset> for FormPolicy {
    fn from(preset: PolicyPreset) -> Self {
        match preset {
            PolicyPreset::Standard => Self::standard(),
            PolicyPreset::Strict => Self::strict(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_share_option_lists() {
        let standard = FormPolicy::standard();
        let strict = FormPolicy::strict();

        for field in [Field::Formation, Field::Source, Field::Location] {
            assert_eq!(standard.choices(field), strict.choices(field));
        }
        assert_eq!(standard.choices(Field::Source).map(<[String]>::len), Some(3));
        assert!(standard.choices(Field::Name).is_none());
    }

    #[test]
    fn allows_checks_membership_only_for_enumerations() {
        let policy = FormPolicy::standard();

        assert!(policy.allows(Field::Location, "Constantine"));
        assert!(policy.allows(Field::Location, ""));
        assert!(!policy.allows(Field::Location, "Oran"));
        assert!(policy.allows(Field::Company, "anything at all"));
    }

    #[test]
    fn custom_choices_replace_or_clear_options() {
        let policy = FormPolicy::standard()
            .with_choices(Field::Location, ["Oran"])
            .with_choices(Field::Source, Vec::<String>::new());

        assert!(policy.allows(Field::Location, "Oran"));
        assert!(!policy.allows(Field::Location, "Alger"));
        assert!(policy.choices(Field::Source).is_none());
    }

    #[test]
    fn preset_conversion() {
        assert_eq!(FormPolicy::from(PolicyPreset::Strict), FormPolicy::strict());
        assert_eq!(FormPolicy::default(), FormPolicy::standard());
    }
}
