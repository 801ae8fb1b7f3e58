// crates/sl-geodb-core/src/model/nested.rs
use super::LocationKind;
use serde::{Deserialize, Serialize};

/// # The Nested Model
///
/// A "Tree" structure built from the flat records:
/// `Region` -> `Vec<District>` -> `Vec<Chiefdom>` -> `Vec<Town>`.
///
/// Parent names stored on children (`region`, `district`, …) are plain
/// copies for display; ownership only flows downwards.

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub code: String,
    pub districts: Vec<District>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct District {
    pub name: String,
    pub code: String,
    pub region: String,
    pub chiefdoms: Vec<Chiefdom>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chiefdom {
    pub name: String,
    pub code: String,
    pub region: String,
    pub district: String,
    pub towns: Vec<Town>,
}

/// Leaf of the tree. Never deduplicated: repeated rows give repeated towns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Town {
    pub name: String,
    pub code: String,
    pub region: String,
    pub district: String,
    pub chiefdom: String,
    pub section: Option<String>,
    pub council: Option<String>,
    pub population: Option<u32>,
}

impl Region {
    pub fn new(name: &str) -> Self {
        Region {
            name: name.to_owned(),
            code: LocationKind::Region.code_for(name),
            districts: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }
}

impl District {
    pub fn new(name: &str, region: &str) -> Self {
        District {
            name: name.to_owned(),
            code: LocationKind::District.code_for(name),
            region: region.to_owned(),
            chiefdoms: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn chiefdoms(&self) -> &[Chiefdom] {
        &self.chiefdoms
    }
}

impl Chiefdom {
    pub fn new(name: &str, region: &str, district: &str) -> Self {
        Chiefdom {
            name: name.to_owned(),
            code: LocationKind::Chiefdom.code_for(name),
            region: region.to_owned(),
            district: district.to_owned(),
            towns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn towns(&self) -> &[Town] {
        &self.towns
    }
}

impl Town {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn council(&self) -> Option<&str> {
        self.council.as_deref()
    }
}

/// Borrowed view of any node in the tree, e.g. the result of a code lookup.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Region(&'a Region),
    District(&'a District),
    Chiefdom(&'a Chiefdom),
    Town(&'a Town),
}

impl<'a> NodeRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            NodeRef::Region(r) => &r.name,
            NodeRef::District(d) => &d.name,
            NodeRef::Chiefdom(c) => &c.name,
            NodeRef::Town(t) => &t.name,
        }
    }

    pub fn code(&self) -> &'a str {
        match self {
            NodeRef::Region(r) => &r.code,
            NodeRef::District(d) => &d.code,
            NodeRef::Chiefdom(c) => &c.code,
            NodeRef::Town(t) => &t.code,
        }
    }

    pub fn kind(&self) -> LocationKind {
        match self {
            NodeRef::Region(_) => LocationKind::Region,
            NodeRef::District(_) => LocationKind::District,
            NodeRef::Chiefdom(_) => LocationKind::Chiefdom,
            NodeRef::Town(_) => LocationKind::Town,
        }
    }
}
