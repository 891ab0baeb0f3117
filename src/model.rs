use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Error;

/// Provenance notes keyed by schema field key (`block6c`, `aircraft.registration`).
pub type Sources = BTreeMap<String, String>;

/// Implemented by every form record so the shared layout code can reach
/// the provenance notes without knowing the concrete form.
pub trait Record: DeserializeOwned + Default {
    fn sources(&self) -> &Sources;

    /// Build a record from already-parsed JSON. Only the top level is
    /// strict: it must be an object. Everything below degrades to absent.
    fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Object(_) => Ok(Self::deserialize(value)?),
            other => Err(Error::NotARecord {
                found: json_kind(other),
            }),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Scalar leaf: strings as-is, numbers and booleans as text, anything else absent.
fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Nested sub-record: absent unless the value is an object.
fn record<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(d)? {
        v @ Value::Object(_) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

fn sources<'de, D: Deserializer<'de>>(d: D) -> Result<Sources, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::String(s) if !s.trim().is_empty() => Some((k, s)),
                _ => None,
            })
            .collect(),
        _ => Sources::new(),
    })
}

// ---------------------------------------------------------------------------
// FAA Form 8130-3

/// Authorized Release Certificate. Block 14 is not read from the record:
/// the attestation wording is fixed by regulation.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Form8130 {
    #[serde(deserialize_with = "text")]
    pub block1: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block2: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block3: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block4: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block5: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block6a: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block6b: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block6c: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block6d: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block6e: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block7: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block8: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block9: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block10: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block11: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block12: Option<String>,
    #[serde(deserialize_with = "text")]
    pub block13: Option<String>,
    #[serde(deserialize_with = "sources")]
    pub sources: Sources,
}

impl Record for Form8130 {
    fn sources(&self) -> &Sources {
        &self.sources
    }
}

// ---------------------------------------------------------------------------
// Shared sub-records

/// Aircraft identity. Form 337 says `make`, Form 8010-4 says `manufacturer`;
/// both are kept and `maker()` picks whichever is present.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AircraftIdentity {
    #[serde(deserialize_with = "text")]
    pub registration: Option<String>,
    #[serde(deserialize_with = "text")]
    pub serial_number: Option<String>,
    #[serde(deserialize_with = "text")]
    pub make: Option<String>,
    #[serde(deserialize_with = "text")]
    pub manufacturer: Option<String>,
    #[serde(deserialize_with = "text")]
    pub model: Option<String>,
}

impl AircraftIdentity {
    pub fn maker(&self) -> Option<&str> {
        self.make.as_deref().or(self.manufacturer.as_deref())
    }
}

// ---------------------------------------------------------------------------
// FAA Form 337

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Owner {
    #[serde(deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub address: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnitIdentity {
    #[serde(deserialize_with = "text")]
    pub make: Option<String>,
    #[serde(deserialize_with = "text")]
    pub model: Option<String>,
    #[serde(deserialize_with = "text")]
    pub serial_number: Option<String>,
    #[serde(rename = "type", deserialize_with = "text")]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Conformity {
    #[serde(deserialize_with = "text")]
    pub agency: Option<String>,
    #[serde(deserialize_with = "text")]
    pub agency_kind: Option<String>,
    #[serde(deserialize_with = "text")]
    pub certificate_number: Option<String>,
    #[serde(deserialize_with = "text")]
    pub signed_by: Option<String>,
    #[serde(deserialize_with = "text")]
    pub date: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Approval {
    #[serde(deserialize_with = "text")]
    pub status: Option<String>,
    #[serde(rename = "type", deserialize_with = "text")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "text")]
    pub certificate: Option<String>,
    #[serde(deserialize_with = "text")]
    pub signed_by: Option<String>,
    #[serde(deserialize_with = "text")]
    pub date: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitClass {
    Airframe,
    Powerplant,
    Propeller,
    Appliance,
}

impl UnitClass {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AIRFRAME" | "AIRCRAFT" => Some(Self::Airframe),
            "POWERPLANT" | "ENGINE" => Some(Self::Powerplant),
            "PROPELLER" => Some(Self::Propeller),
            "APPLIANCE" => Some(Self::Appliance),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Airframe => "Airframe",
            Self::Powerplant => "Powerplant",
            Self::Propeller => "Propeller",
            Self::Appliance => "Appliance",
        }
    }
}

/// Major Repair and Alteration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Form337 {
    #[serde(deserialize_with = "record")]
    pub aircraft: Option<AircraftIdentity>,
    #[serde(deserialize_with = "record")]
    pub owner: Option<Owner>,
    #[serde(deserialize_with = "text")]
    pub repair_type: Option<String>,
    #[serde(deserialize_with = "text")]
    pub unit: Option<String>,
    #[serde(deserialize_with = "record")]
    pub airframe: Option<UnitIdentity>,
    #[serde(deserialize_with = "record")]
    pub powerplant: Option<UnitIdentity>,
    #[serde(deserialize_with = "record")]
    pub propeller: Option<UnitIdentity>,
    #[serde(deserialize_with = "record")]
    pub appliance: Option<UnitIdentity>,
    #[serde(deserialize_with = "record")]
    pub conformity: Option<Conformity>,
    #[serde(deserialize_with = "record")]
    pub approval: Option<Approval>,
    #[serde(deserialize_with = "text")]
    pub work_description: Option<String>,
    #[serde(deserialize_with = "sources")]
    pub sources: Sources,
}

impl Form337 {
    pub fn unit_class(&self) -> Option<UnitClass> {
        self.unit.as_deref().and_then(UnitClass::parse)
    }

    /// Sub-record selected by the unit classification.
    pub fn unit_identity(&self) -> Option<&UnitIdentity> {
        match self.unit_class()? {
            UnitClass::Airframe => self.airframe.as_ref(),
            UnitClass::Powerplant => self.powerplant.as_ref(),
            UnitClass::Propeller => self.propeller.as_ref(),
            UnitClass::Appliance => self.appliance.as_ref(),
        }
    }

    /// An airframe unit may be described only by the aircraft block.
    fn airframe_aircraft(&self) -> Option<&AircraftIdentity> {
        match self.unit_class() {
            Some(UnitClass::Airframe) => self.aircraft.as_ref(),
            _ => None,
        }
    }

    pub fn unit_make(&self) -> Option<&str> {
        self.unit_identity()
            .and_then(|u| u.make.as_deref())
            .or_else(|| self.airframe_aircraft().and_then(AircraftIdentity::maker))
    }

    pub fn unit_model(&self) -> Option<&str> {
        self.unit_identity()
            .and_then(|u| u.model.as_deref())
            .or_else(|| self.airframe_aircraft().and_then(|a| a.model.as_deref()))
    }

    pub fn unit_serial_number(&self) -> Option<&str> {
        self.unit_identity()
            .and_then(|u| u.serial_number.as_deref())
            .or_else(|| self.airframe_aircraft().and_then(|a| a.serial_number.as_deref()))
    }

    pub fn unit_kind(&self) -> Option<&str> {
        self.unit_identity().and_then(|u| u.kind.as_deref())
    }
}

impl Record for Form337 {
    fn sources(&self) -> &Sources {
        &self.sources
    }
}

// ---------------------------------------------------------------------------
// FAA Form 8010-4

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DefectPart {
    #[serde(deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub part_number: Option<String>,
    #[serde(deserialize_with = "text")]
    pub serial_number: Option<String>,
    #[serde(deserialize_with = "text")]
    pub location: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentAssembly {
    #[serde(deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub manufacturer: Option<String>,
    #[serde(deserialize_with = "text")]
    pub part_number: Option<String>,
    #[serde(deserialize_with = "text")]
    pub serial_number: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartMetrics {
    #[serde(deserialize_with = "text")]
    pub part_total_time: Option<String>,
    #[serde(rename = "partTSO", alias = "partTso", deserialize_with = "text")]
    pub part_tso: Option<String>,
    #[serde(deserialize_with = "text")]
    pub part_condition: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Submitter {
    #[serde(rename = "type", deserialize_with = "text")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "text")]
    pub designation: Option<String>,
    #[serde(deserialize_with = "text")]
    pub telephone: Option<String>,
}

/// Malfunction or Defect Report.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Form8010 {
    #[serde(deserialize_with = "record")]
    pub aircraft: Option<AircraftIdentity>,
    #[serde(deserialize_with = "record")]
    pub defect_part: Option<DefectPart>,
    #[serde(deserialize_with = "record")]
    pub component_assembly: Option<ComponentAssembly>,
    #[serde(deserialize_with = "record")]
    pub metrics: Option<PartMetrics>,
    #[serde(deserialize_with = "text")]
    pub date_submitted: Option<String>,
    #[serde(deserialize_with = "text")]
    pub comments: Option<String>,
    #[serde(deserialize_with = "record")]
    pub submitted_by: Option<Submitter>,
    #[serde(deserialize_with = "sources")]
    pub sources: Sources,
}

impl Record for Form8010 {
    fn sources(&self) -> &Sources {
        &self.sources
    }
}
