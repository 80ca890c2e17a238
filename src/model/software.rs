//! Analysis software, provider, and bibliographic records

use serde::{Deserialize, Serialize};

use super::refs::{impl_identified, EntityRef};
use crate::param::{CvParam, Param};

/// A software package that produced or processed the identifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSoftware {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub uri: Option<String>,
    /// CV or user param naming the software
    pub software_name: Option<Param>,
    pub customizations: Option<String>,
}

impl AnalysisSoftware {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            version: None,
            uri: None,
            software_name: None,
            customizations: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_software_name(mut self, param: impl Into<Param>) -> Self {
        self.software_name = Some(param.into());
        self
    }
}

/// The provider of the document: which software, in what role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub software: EntityRef<AnalysisSoftware>,
    /// Role of the providing contact (e.g. software vendor, researcher)
    pub role: Option<CvParam>,
}

impl Provider {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            software: EntityRef::default(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: CvParam) -> Self {
        self.role = Some(role);
        self
    }
}

/// A literature reference attached to the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BibliographicReference {
    pub id: String,
    pub authors: Option<String>,
    pub title: Option<String>,
    pub publication: Option<String>,
    pub year: Option<i32>,
    pub volume: Option<String>,
    pub pages: Option<String>,
    pub doi: Option<String>,
}

impl BibliographicReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            authors: None,
            title: None,
            publication: None,
            year: None,
            volume: None,
            pages: None,
            doi: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = Some(authors.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }
}

impl_identified!(AnalysisSoftware, Provider, BibliographicReference);
