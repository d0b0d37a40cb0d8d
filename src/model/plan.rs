//! Plan catalog reference data and per-order customization toggles.

use serde::{Deserialize, Serialize};

/// A subscription plan from the host's catalog. Read-only to the wizard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub price_minor_units: u64,
    pub duration_label: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
}

/// The static plan list supplied by the host application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self { plans }
    }

    /// Parse a catalog from a JSON array of plans.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn find(&self, id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn popular(&self) -> impl Iterator<Item = &Plan> {
        self.plans.iter().filter(|p| p.is_popular)
    }
}

/// Optional extras that can be toggled on an order until it is locked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Addon {
    ExtraArtSupplies,
    ScienceMaterials,
    DigitalResources,
    ParentGuide,
}

impl Addon {
    pub const ALL: [Addon; 4] = [
        Self::ExtraArtSupplies,
        Self::ScienceMaterials,
        Self::DigitalResources,
        Self::ParentGuide,
    ];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomizationOptions {
    pub extra_art_supplies: bool,
    pub science_materials: bool,
    pub digital_resources: bool,
    pub parent_guide: bool,
}

impl CustomizationOptions {
    fn slot(&mut self, addon: Addon) -> &mut bool {
        match addon {
            Addon::ExtraArtSupplies => &mut self.extra_art_supplies,
            Addon::ScienceMaterials => &mut self.science_materials,
            Addon::DigitalResources => &mut self.digital_resources,
            Addon::ParentGuide => &mut self.parent_guide,
        }
    }

    pub fn set(&mut self, addon: Addon, enabled: bool) {
        *self.slot(addon) = enabled;
    }

    pub fn is_enabled(&self, addon: Addon) -> bool {
        match addon {
            Addon::ExtraArtSupplies => self.extra_art_supplies,
            Addon::ScienceMaterials => self.science_materials,
            Addon::DigitalResources => self.digital_resources,
            Addon::ParentGuide => self.parent_guide,
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = Addon> + '_ {
        Addon::ALL.into_iter().filter(|a| self.is_enabled(*a))
    }
}
