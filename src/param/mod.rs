//! Parameter model: CV-backed and user-defined parameters
//!
//! A [`CvParam`] stores only a canonical term id and a value string; its name
//! and accession are derived from the registry and cannot be set. A
//! [`UserParam`] stores its name directly and has no registry dependency.
//! Both carry an optional unit term resolved through the registry and the
//! document's [`CvTranslator`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cv::{CvSource, CvTerm, CvTranslator};

/// Errors raised by the param model.
///
/// Lookup misses are not errors anywhere in this crate; typed value
/// conversion is the one place malformed content is reported loudly.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("cannot interpret value '{value}' as {target}")]
    InvalidValue { value: String, target: &'static str },
}

/// Result type for param operations.
pub type ParamResult<T> = Result<T, ParamError>;

fn parse_value<T: FromStr>(value: Option<&str>) -> ParamResult<T> {
    let raw = value.unwrap_or_default();
    raw.parse().map_err(|_| ParamError::InvalidValue {
        value: raw.to_string(),
        target: std::any::type_name::<T>(),
    })
}

/// A CV-backed parameter.
///
/// Name and accession are derived entirely from the stored term id; there is
/// no settable name field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvParam {
    /// Canonical term id
    pub term: CvTerm,
    /// Value string as it appears in the exchange format
    pub value: Option<String>,
    /// Unit-of-measure term
    pub unit: Option<CvTerm>,
}

impl CvParam {
    /// Canonical construction path: from a term id, no value.
    pub fn new(term: CvTerm) -> Self {
        Self {
            term,
            value: None,
            unit: None,
        }
    }

    /// Set the value string.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the unit term.
    pub fn with_unit(mut self, unit: CvTerm) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Raw construction path: from an accession string under a file-local
    /// CV prefix, through the translator/registry lookup.
    ///
    /// A lookup miss yields a param with [`CvTerm::Unknown`], never an error.
    pub fn from_accession(
        accession: &str,
        cv_ref: &str,
        value: Option<&str>,
        translator: &CvTranslator,
    ) -> Self {
        Self {
            term: translator.term_by_accession(accession, cv_ref),
            value: value.map(str::to_string),
            unit: None,
        }
    }

    /// Display name, derived from the registry.
    pub fn name(&self) -> &'static str {
        self.term.name()
    }

    /// Accession, derived from the registry.
    pub fn accession(&self) -> &'static str {
        self.term.accession()
    }

    /// The document-local prefix for this param's vocabulary.
    pub fn cv_ref<'a>(&self, translator: &'a CvTranslator) -> Option<&'a str> {
        translator.translate_source(self.term.source())
    }

    /// Unit term id.
    pub fn unit_term(&self) -> Option<CvTerm> {
        self.unit
    }

    /// Unit accession, empty when no unit is set or the unit is unknown.
    pub fn unit_accession(&self) -> &'static str {
        self.unit.map(|u| u.accession()).unwrap_or("")
    }

    /// Unit display name, empty when no unit is set or the unit is unknown.
    pub fn unit_name(&self) -> &'static str {
        self.unit.map(|u| u.name()).unwrap_or("")
    }

    /// The document-local prefix for the unit's vocabulary.
    pub fn unit_cv_ref<'a>(&self, translator: &'a CvTranslator) -> Option<&'a str> {
        self.unit
            .and_then(|u| translator.translate_source(u.source()))
    }

    /// Set the unit from an accession string under a file-local CV prefix.
    ///
    /// Same lookup-or-unknown policy as [`CvParam::from_accession`].
    pub fn set_unit_accession(&mut self, accession: &str, cv_ref: &str, translator: &CvTranslator) {
        self.unit = Some(translator.term_by_accession(accession, cv_ref));
    }

    /// Parse the stored value string as `T`.
    ///
    /// Fails loudly with [`ParamError::InvalidValue`] on parse failure; an
    /// absent value parses as the empty string (and fails for most targets).
    pub fn value_as<T: FromStr>(&self) -> ParamResult<T> {
        parse_value(self.value.as_deref())
    }
}

/// A user-defined parameter, stored verbatim with no registry dependency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserParam {
    /// Parameter name as it appears in the exchange format
    pub name: String,
    /// Value string
    pub value: Option<String>,
    /// Declared value type, if any
    pub kind: Option<String>,
    /// Unit-of-measure term
    pub unit: Option<CvTerm>,
}

impl UserParam {
    /// Create a user param with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            kind: None,
            unit: None,
        }
    }

    /// Set the value string.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the declared value type.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the unit term.
    pub fn with_unit(mut self, unit: CvTerm) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Unit accession, empty when no unit is set or the unit is unknown.
    pub fn unit_accession(&self) -> &'static str {
        self.unit.map(|u| u.accession()).unwrap_or("")
    }

    /// Unit display name, empty when no unit is set or the unit is unknown.
    pub fn unit_name(&self) -> &'static str {
        self.unit.map(|u| u.name()).unwrap_or("")
    }

    /// Set the unit from an accession string under a file-local CV prefix.
    pub fn set_unit_accession(&mut self, accession: &str, cv_ref: &str, translator: &CvTranslator) {
        self.unit = Some(translator.term_by_accession(accession, cv_ref));
    }

    /// Parse the stored value string as `T`, failing loudly on mismatch.
    pub fn value_as<T: FromStr>(&self) -> ParamResult<T> {
        parse_value(self.value.as_deref())
    }
}

/// Either parameter variant.
///
/// Two params are equal iff they wrap the same variant and the wrapped
/// items are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Param {
    Cv(CvParam),
    User(UserParam),
}

impl Param {
    /// Display name: registry-derived for CV params, stored for user params.
    pub fn name(&self) -> &str {
        match self {
            Param::Cv(p) => p.name(),
            Param::User(p) => &p.name,
        }
    }

    /// Value string.
    pub fn value(&self) -> Option<&str> {
        match self {
            Param::Cv(p) => p.value.as_deref(),
            Param::User(p) => p.value.as_deref(),
        }
    }

    /// Unit term id.
    pub fn unit_term(&self) -> Option<CvTerm> {
        match self {
            Param::Cv(p) => p.unit,
            Param::User(p) => p.unit,
        }
    }

    /// Unit accession, empty when no unit is set.
    pub fn unit_accession(&self) -> &'static str {
        match self {
            Param::Cv(p) => p.unit_accession(),
            Param::User(p) => p.unit_accession(),
        }
    }

    /// The source vocabulary, [`CvSource::Unknown`] for user params.
    pub fn source(&self) -> CvSource {
        match self {
            Param::Cv(p) => p.term.source(),
            Param::User(_) => CvSource::Unknown,
        }
    }

    /// Parse the stored value string as `T`, failing loudly on mismatch.
    pub fn value_as<T: FromStr>(&self) -> ParamResult<T> {
        match self {
            Param::Cv(p) => p.value_as(),
            Param::User(p) => p.value_as(),
        }
    }
}

impl From<CvParam> for Param {
    fn from(param: CvParam) -> Self {
        Param::Cv(param)
    }
}

impl From<UserParam> for Param {
    fn from(param: UserParam) -> Self {
        Param::User(param)
    }
}

/// Ordered sequence of CV params.
///
/// Equality is structural and order-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamGroup {
    pub cv_params: Vec<CvParam>,
}

impl ParamGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a CV param.
    pub fn push(&mut self, param: CvParam) {
        self.cv_params.push(param);
    }

    /// First param carrying the given term, if any.
    pub fn get(&self, term: CvTerm) -> Option<&CvParam> {
        self.cv_params.iter().find(|p| p.term == term)
    }

    pub fn is_empty(&self) -> bool {
        self.cv_params.is_empty()
    }
}

/// Extended variant: ordered CV params plus ordered user params.
///
/// Equality is structural over both sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamList {
    pub cv_params: Vec<CvParam>,
    pub user_params: Vec<UserParam>,
}

impl ParamList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a CV param.
    pub fn push_cv(&mut self, param: CvParam) {
        self.cv_params.push(param);
    }

    /// Append a user param.
    pub fn push_user(&mut self, param: UserParam) {
        self.user_params.push(param);
    }

    /// First CV param carrying the given term, if any.
    pub fn get_cv(&self, term: CvTerm) -> Option<&CvParam> {
        self.cv_params.iter().find(|p| p.term == term)
    }

    /// First user param with the given name, if any.
    pub fn get_user(&self, name: &str) -> Option<&UserParam> {
        self.user_params.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.cv_params.is_empty() && self.user_params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::Cv;

    fn translator() -> CvTranslator {
        CvTranslator::from_cv_list(&[
            Cv::from_source(CvSource::PsiMs),
            Cv::from_source(CvSource::UnitOntology),
        ])
    }

    #[test]
    fn cv_param_name_and_accession_are_derived() {
        let param = CvParam::new(CvTerm::ScanStartTime).with_value("12.5");
        assert_eq!(param.name(), "scan start time");
        assert_eq!(param.accession(), "MS:1000016");
    }

    #[test]
    fn from_accession_goes_through_translator() {
        let t = translator();
        let param = CvParam::from_accession("MS:1000016", "MS", Some("42"), &t);
        assert_eq!(param.term, CvTerm::ScanStartTime);
        assert_eq!(param.value.as_deref(), Some("42"));

        let miss = CvParam::from_accession("MS:0000000", "MS", None, &t);
        assert_eq!(miss.term, CvTerm::Unknown);
        assert_eq!(miss.name(), "");
    }

    #[test]
    fn set_unit_accession_lookup_or_unknown() {
        let t = translator();
        let mut param = CvParam::new(CvTerm::ScanStartTime);
        param.set_unit_accession("UO:0000031", "UO", &t);
        assert_eq!(param.unit, Some(CvTerm::Minute));
        assert_eq!(param.unit_name(), "minute");

        // UNIMOD prefix never declared: degrade, don't fail
        param.set_unit_accession("UNIMOD:4", "UNIMOD", &t);
        assert_eq!(param.unit, Some(CvTerm::Unknown));
        assert_eq!(param.unit_accession(), "");
    }

    #[test]
    fn value_conversion_succeeds_and_fails_loudly() {
        let param = CvParam::new(CvTerm::RetentionTime).with_value("17.25");
        assert_eq!(param.value_as::<f64>().unwrap(), 17.25);

        let bad = CvParam::new(CvTerm::RetentionTime).with_value("not-a-number");
        let err = bad.value_as::<f64>().unwrap_err();
        assert!(matches!(err, ParamError::InvalidValue { .. }));

        let empty = CvParam::new(CvTerm::RetentionTime);
        assert!(empty.value_as::<i32>().is_err());
    }

    #[test]
    fn cv_param_equality_by_term_value_unit() {
        let a = CvParam::new(CvTerm::ScanStartTime)
            .with_value("1.0")
            .with_unit(CvTerm::Minute);
        let b = CvParam::new(CvTerm::ScanStartTime)
            .with_value("1.0")
            .with_unit(CvTerm::Minute);
        let c = CvParam::new(CvTerm::ScanStartTime)
            .with_value("1.0")
            .with_unit(CvTerm::Second);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn user_param_equality_includes_kind() {
        let a = UserParam::new("precursor window").with_value("2").with_kind("xsd:int");
        let b = UserParam::new("precursor window").with_value("2").with_kind("xsd:int");
        let c = UserParam::new("precursor window").with_value("2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn param_wrapper_equality_follows_wrapped_item() {
        let cv: Param = CvParam::new(CvTerm::NoThreshold).into();
        let user: Param = UserParam::new("no threshold").into();
        assert_eq!(cv, Param::Cv(CvParam::new(CvTerm::NoThreshold)));
        assert_ne!(cv, user);
    }

    #[test]
    fn param_group_equality_is_order_sensitive() {
        let mut a = ParamGroup::new();
        a.push(CvParam::new(CvTerm::Trypsin));
        a.push(CvParam::new(CvTerm::NoThreshold));

        let mut b = ParamGroup::new();
        b.push(CvParam::new(CvTerm::NoThreshold));
        b.push(CvParam::new(CvTerm::Trypsin));

        assert_ne!(a, b);
    }
}
