//! Static field layouts for the three forms. Schemas are process-wide
//! constants; renderers only read them.

use std::borrow::Cow;

use crate::model::{Form337, Form8010, Form8130, UnitClass};

/// Block 14 wording of the 8130-3. Never taken from the record.
pub const ATTESTATION: &str = "Except as noted above, the work identified in Block 5 and described in Block 7 was accomplished in accordance with current FAA-approved data and with respect to that work, the items are approved for return to service.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    ShortText,
    MultilineText,
    Date,
    /// Mutually exclusive options, rendered as check boxes.
    Choice(&'static [&'static str]),
    /// Printed name above a signature line.
    Signature,
}

/// What an absent value renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Absent {
    Blank,
    Dash,
}

impl Absent {
    pub fn placeholder(self) -> &'static str {
        match self {
            Absent::Blank => "",
            Absent::Dash => "-",
        }
    }
}

pub struct FieldDef<R: 'static> {
    /// Dotted JSON path of the value, also the key of its source annotation.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub absent: Absent,
    pub highlight: bool,
    /// Share of the row width in flowing layouts.
    pub weight: f32,
    pub get: fn(&R) -> Option<&str>,
}

fn never<R>(_: &R) -> Option<&str> {
    None
}

impl<R> FieldDef<R> {
    /// Base for struct-update syntax in the schema tables.
    pub const TEXT: Self = Self {
        key: "",
        label: "",
        kind: FieldKind::ShortText,
        absent: Absent::Dash,
        highlight: false,
        weight: 1.0,
        get: never::<R>,
    };

    /// The present, non-blank value.
    pub fn value<'r>(&self, record: &'r R) -> Option<&'r str> {
        (self.get)(record).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Text as it appears on the form, with the absence policy applied.
    pub fn display<'r>(&self, record: &'r R) -> Cow<'r, str> {
        match self.kind {
            FieldKind::Choice(options) => Cow::Owned(choice_line(options, self.value(record))),
            _ => match self.value(record) {
                Some(v) => Cow::Borrowed(v),
                None => Cow::Borrowed(self.absent.placeholder()),
            },
        }
    }
}

fn canonical_choice(value: &str) -> String {
    match UnitClass::parse(value) {
        Some(class) => class.label().to_ascii_uppercase(),
        None => value.trim().to_ascii_uppercase(),
    }
}

/// `[X] Repair   [ ] Alteration`. An unmatched value checks nothing.
pub fn choice_line(options: &[&str], value: Option<&str>) -> String {
    let chosen = value.map(canonical_choice);
    options
        .iter()
        .map(|option| {
            let mark = if chosen.as_deref() == Some(option.to_ascii_uppercase().as_str()) {
                'X'
            } else {
                ' '
            };
            format!("[{mark}] {option}")
        })
        .collect::<Vec<_>>()
        .join("     ")
}

/// Position inside the 8130-3 grid, in points from the grid's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GridBox {
    const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

pub struct GridBlock<R: 'static> {
    pub field: FieldDef<R>,
    pub at: GridBox,
    /// The only block whose text may continue on later pages.
    pub overflows: bool,
}

pub struct GridSchema<R: 'static> {
    pub form_number: &'static str,
    pub title: &'static str,
    pub continuation: &'static str,
    pub blocks: &'static [GridBlock<R>],
}

impl<R> GridSchema<R> {
    pub fn height(&self) -> f32 {
        self.blocks
            .iter()
            .map(|b| b.at.y + b.at.height)
            .fold(0.0f32, f32::max)
    }

    pub fn narrative(&self) -> Option<&GridBlock<R>> {
        self.blocks.iter().find(|b| b.overflows)
    }
}

pub enum SectionBody<R: 'static> {
    Rows(&'static [&'static [FieldDef<R>]]),
    /// Free text that may span pages. `headings` renders ALL-CAPS lines bold.
    Narrative { field: FieldDef<R>, headings: bool },
}

pub struct Section<R: 'static> {
    pub title: &'static str,
    pub body: SectionBody<R>,
}

pub struct FlowSchema<R: 'static> {
    pub form_number: &'static str,
    pub title: &'static str,
    pub sections: &'static [Section<R>],
}

impl<R> FlowSchema<R> {
    /// Every field in layout order.
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldDef<R>> {
        self.sections.iter().flat_map(section_fields)
    }
}

fn section_fields<R>(section: &'static Section<R>) -> Box<dyn Iterator<Item = &'static FieldDef<R>>> {
    match &section.body {
        SectionBody::Rows(rows) => Box::new(rows.iter().flat_map(|r| r.iter())),
        SectionBody::Narrative { field, .. } => Box::new(std::iter::once(field)),
    }
}

// ---------------------------------------------------------------------------

pub static FORM_8130_3: GridSchema<Form8130> = GridSchema {
    form_number: "FAA Form 8130-3",
    title: "Authorized Release Certificate",
    continuation: "Continuation of Block 7 - Remarks",
    blocks: &[
        GridBlock {
            field: FieldDef {
                key: "block1",
                label: "1. Approving Authority / Country",
                absent: Absent::Blank,
                get: |r| r.block1.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(0.0, 0.0, 150.0, 46.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block2",
                label: "2. Document Title",
                absent: Absent::Blank,
                get: |r| r.block2.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(150.0, 0.0, 240.0, 46.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block3",
                label: "3. Form Tracking Number",
                absent: Absent::Blank,
                get: |r| r.block3.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(390.0, 0.0, 150.0, 46.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block4",
                label: "4. Organization Name and Address",
                kind: FieldKind::MultilineText,
                absent: Absent::Blank,
                get: |r| r.block4.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(0.0, 46.0, 390.0, 64.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block5",
                label: "5. Work Order / Contract / Invoice",
                absent: Absent::Blank,
                get: |r| r.block5.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(390.0, 46.0, 150.0, 64.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block6a",
                label: "6a. Item / Description",
                absent: Absent::Blank,
                get: |r| r.block6a.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(0.0, 110.0, 160.0, 46.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block6b",
                label: "6b. Part Number",
                absent: Absent::Blank,
                highlight: true,
                get: |r| r.block6b.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(160.0, 110.0, 110.0, 46.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block6c",
                label: "6c. Serial Number",
                absent: Absent::Blank,
                highlight: true,
                get: |r| r.block6c.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(270.0, 110.0, 110.0, 46.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block6d",
                label: "6d. Quantity",
                absent: Absent::Blank,
                get: |r| r.block6d.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(380.0, 110.0, 50.0, 46.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block6e",
                label: "6e. Status / Work",
                absent: Absent::Blank,
                get: |r| r.block6e.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(430.0, 110.0, 110.0, 46.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block7",
                label: "7. Remarks",
                kind: FieldKind::MultilineText,
                absent: Absent::Blank,
                get: |r| r.block7.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(0.0, 156.0, 540.0, 300.0),
            overflows: true,
        },
        GridBlock {
            field: FieldDef {
                key: "block8",
                label: "8. Airworthiness Condition",
                absent: Absent::Blank,
                get: |r| r.block8.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(0.0, 456.0, 180.0, 40.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block9",
                label: "9. Approval Basis",
                absent: Absent::Blank,
                get: |r| r.block9.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(180.0, 456.0, 180.0, 40.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block10",
                label: "10. Return to Service Reference",
                absent: Absent::Blank,
                get: |r| r.block10.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(360.0, 456.0, 180.0, 40.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block11",
                label: "11. Certificate / Approval Number",
                absent: Absent::Blank,
                get: |r| r.block11.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(0.0, 496.0, 180.0, 40.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block12",
                label: "12. Date",
                kind: FieldKind::Date,
                absent: Absent::Blank,
                get: |r| r.block12.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(180.0, 496.0, 180.0, 40.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block13",
                label: "13. Authorized Signature / Name",
                kind: FieldKind::Signature,
                absent: Absent::Blank,
                get: |r| r.block13.as_deref(),
                ..FieldDef::TEXT
            },
            at: GridBox::new(360.0, 496.0, 180.0, 40.0),
            overflows: false,
        },
        GridBlock {
            field: FieldDef {
                key: "block14",
                label: "14. Certification Statement",
                kind: FieldKind::MultilineText,
                absent: Absent::Blank,
                get: |_| Some(ATTESTATION),
                ..FieldDef::TEXT
            },
            at: GridBox::new(0.0, 536.0, 540.0, 70.0),
            overflows: false,
        },
    ],
};

const REPAIR_TYPES: &[&str] = &["Repair", "Alteration"];
const UNIT_CLASSES: &[&str] = &["Airframe", "Powerplant", "Propeller", "Appliance"];

pub static FORM_337: FlowSchema<Form337> = FlowSchema {
    form_number: "FAA Form 337",
    title: "Major Repair and Alteration",
    sections: &[
        Section {
            title: "1. Aircraft",
            body: SectionBody::Rows(&[&[
                FieldDef {
                    key: "aircraft.registration",
                    label: "Nationality and Registration Mark",
                    weight: 1.4,
                    get: |r| r.aircraft.as_ref().and_then(|a| a.registration.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "aircraft.serialNumber",
                    label: "Serial No.",
                    get: |r| r.aircraft.as_ref().and_then(|a| a.serial_number.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "aircraft.make",
                    label: "Make",
                    get: |r| r.aircraft.as_ref().and_then(|a| a.maker()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "aircraft.model",
                    label: "Model",
                    get: |r| r.aircraft.as_ref().and_then(|a| a.model.as_deref()),
                    ..FieldDef::TEXT
                },
            ]]),
        },
        Section {
            title: "2. Owner",
            body: SectionBody::Rows(&[&[
                FieldDef {
                    key: "owner.name",
                    label: "Name (as shown on registration certificate)",
                    get: |r| r.owner.as_ref().and_then(|o| o.name.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "owner.address",
                    label: "Address",
                    kind: FieldKind::MultilineText,
                    weight: 1.4,
                    get: |r| r.owner.as_ref().and_then(|o| o.address.as_deref()),
                    ..FieldDef::TEXT
                },
            ]]),
        },
        Section {
            title: "3. Type",
            body: SectionBody::Rows(&[&[FieldDef {
                key: "repairType",
                label: "Type of Work",
                kind: FieldKind::Choice(REPAIR_TYPES),
                get: |r| r.repair_type.as_deref(),
                ..FieldDef::TEXT
            }]]),
        },
        Section {
            title: "4. Unit",
            body: SectionBody::Rows(&[&[FieldDef {
                key: "unit",
                label: "Unit Classification",
                kind: FieldKind::Choice(UNIT_CLASSES),
                get: |r| r.unit.as_deref(),
                ..FieldDef::TEXT
            }]]),
        },
        Section {
            title: "5. Unit Identification",
            body: SectionBody::Rows(&[&[
                FieldDef {
                    key: "unit.make",
                    label: "Make",
                    get: |r| r.unit_make(),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "unit.model",
                    label: "Model",
                    get: |r| r.unit_model(),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "unit.serialNumber",
                    label: "Serial No.",
                    highlight: true,
                    get: |r| r.unit_serial_number(),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "unit.type",
                    label: "Type",
                    get: |r| r.unit_kind(),
                    ..FieldDef::TEXT
                },
            ]]),
        },
        Section {
            title: "6. Conformity Statement",
            body: SectionBody::Rows(&[
                &[
                    FieldDef {
                        key: "conformity.agency",
                        label: "Agency's Name and Address",
                        kind: FieldKind::MultilineText,
                        weight: 2.0,
                        get: |r| r.conformity.as_ref().and_then(|c| c.agency.as_deref()),
                        ..FieldDef::TEXT
                    },
                    FieldDef {
                        key: "conformity.agencyKind",
                        label: "Kind of Agency",
                        weight: 1.3,
                        get: |r| r.conformity.as_ref().and_then(|c| c.agency_kind.as_deref()),
                        ..FieldDef::TEXT
                    },
                ],
                &[
                    FieldDef {
                        key: "conformity.certificateNumber",
                        label: "Certificate No.",
                        get: |r| r.conformity.as_ref().and_then(|c| c.certificate_number.as_deref()),
                        ..FieldDef::TEXT
                    },
                    FieldDef {
                        key: "conformity.signedBy",
                        label: "Signature of Authorized Individual",
                        kind: FieldKind::Signature,
                        weight: 1.6,
                        get: |r| r.conformity.as_ref().and_then(|c| c.signed_by.as_deref()),
                        ..FieldDef::TEXT
                    },
                    FieldDef {
                        key: "conformity.date",
                        label: "Date",
                        kind: FieldKind::Date,
                        weight: 0.7,
                        get: |r| r.conformity.as_ref().and_then(|c| c.date.as_deref()),
                        ..FieldDef::TEXT
                    },
                ],
            ]),
        },
        Section {
            title: "7. Approval for Return to Service",
            body: SectionBody::Rows(&[
                &[
                    FieldDef {
                        key: "approval.status",
                        label: "Status",
                        get: |r| r.approval.as_ref().and_then(|a| a.status.as_deref()),
                        ..FieldDef::TEXT
                    },
                    FieldDef {
                        key: "approval.type",
                        label: "Approved By",
                        weight: 1.3,
                        get: |r| r.approval.as_ref().and_then(|a| a.kind.as_deref()),
                        ..FieldDef::TEXT
                    },
                    FieldDef {
                        key: "approval.certificate",
                        label: "Certificate or Designation No.",
                        get: |r| r.approval.as_ref().and_then(|a| a.certificate.as_deref()),
                        ..FieldDef::TEXT
                    },
                ],
                &[
                    FieldDef {
                        key: "approval.signedBy",
                        label: "Signature of Authorized Individual",
                        kind: FieldKind::Signature,
                        weight: 2.3,
                        get: |r| r.approval.as_ref().and_then(|a| a.signed_by.as_deref()),
                        ..FieldDef::TEXT
                    },
                    FieldDef {
                        key: "approval.date",
                        label: "Date",
                        kind: FieldKind::Date,
                        get: |r| r.approval.as_ref().and_then(|a| a.date.as_deref()),
                        ..FieldDef::TEXT
                    },
                ],
            ]),
        },
        Section {
            title: "8. Description of Work Accomplished",
            body: SectionBody::Narrative {
                field: FieldDef {
                    key: "workDescription",
                    label: "Description of Work Accomplished",
                    kind: FieldKind::MultilineText,
                    get: |r| r.work_description.as_deref(),
                    ..FieldDef::TEXT
                },
                headings: false,
            },
        },
    ],
};

pub static FORM_8010_4: FlowSchema<Form8010> = FlowSchema {
    form_number: "FAA Form 8010-4",
    title: "Malfunction or Defect Report",
    sections: &[
        Section {
            title: "1. Aircraft",
            body: SectionBody::Rows(&[&[
                FieldDef {
                    key: "aircraft.registration",
                    label: "Registration No.",
                    get: |r| r.aircraft.as_ref().and_then(|a| a.registration.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "aircraft.manufacturer",
                    label: "Manufacturer",
                    get: |r| r.aircraft.as_ref().and_then(|a| a.maker()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "aircraft.model",
                    label: "Model / Series",
                    get: |r| r.aircraft.as_ref().and_then(|a| a.model.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "aircraft.serialNumber",
                    label: "Serial No.",
                    get: |r| r.aircraft.as_ref().and_then(|a| a.serial_number.as_deref()),
                    ..FieldDef::TEXT
                },
            ]]),
        },
        Section {
            title: "2. Defective Part",
            body: SectionBody::Rows(&[&[
                FieldDef {
                    key: "defectPart.name",
                    label: "Part Name",
                    get: |r| r.defect_part.as_ref().and_then(|p| p.name.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "defectPart.partNumber",
                    label: "Part Number",
                    highlight: true,
                    get: |r| r.defect_part.as_ref().and_then(|p| p.part_number.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "defectPart.serialNumber",
                    label: "Serial No.",
                    highlight: true,
                    get: |r| r.defect_part.as_ref().and_then(|p| p.serial_number.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "defectPart.location",
                    label: "Part / Defect Location",
                    weight: 1.5,
                    get: |r| r.defect_part.as_ref().and_then(|p| p.location.as_deref()),
                    ..FieldDef::TEXT
                },
            ]]),
        },
        Section {
            title: "3. Component / Assembly",
            body: SectionBody::Rows(&[&[
                FieldDef {
                    key: "componentAssembly.name",
                    label: "Component Name",
                    get: |r| r.component_assembly.as_ref().and_then(|c| c.name.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "componentAssembly.manufacturer",
                    label: "Manufacturer",
                    get: |r| r.component_assembly.as_ref().and_then(|c| c.manufacturer.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "componentAssembly.partNumber",
                    label: "Part Number",
                    get: |r| r.component_assembly.as_ref().and_then(|c| c.part_number.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "componentAssembly.serialNumber",
                    label: "Serial No.",
                    get: |r| r.component_assembly.as_ref().and_then(|c| c.serial_number.as_deref()),
                    ..FieldDef::TEXT
                },
            ]]),
        },
        Section {
            title: "4. Part Metrics",
            body: SectionBody::Rows(&[&[
                FieldDef {
                    key: "metrics.partTotalTime",
                    label: "Part Total Time",
                    get: |r| r.metrics.as_ref().and_then(|m| m.part_total_time.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "metrics.partTSO",
                    label: "Part Time Since Overhaul",
                    get: |r| r.metrics.as_ref().and_then(|m| m.part_tso.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "metrics.partCondition",
                    label: "Part Condition",
                    get: |r| r.metrics.as_ref().and_then(|m| m.part_condition.as_deref()),
                    ..FieldDef::TEXT
                },
            ]]),
        },
        Section {
            title: "5. Date Submitted",
            body: SectionBody::Rows(&[&[FieldDef {
                key: "dateSubmitted",
                label: "Date Submitted",
                kind: FieldKind::Date,
                get: |r| r.date_submitted.as_deref(),
                ..FieldDef::TEXT
            }]]),
        },
        Section {
            title: "6. Comments",
            body: SectionBody::Narrative {
                field: FieldDef {
                    key: "comments",
                    label: "Comments",
                    kind: FieldKind::MultilineText,
                    get: |r| r.comments.as_deref(),
                    ..FieldDef::TEXT
                },
                headings: true,
            },
        },
        Section {
            title: "7. Submitted By",
            body: SectionBody::Rows(&[&[
                FieldDef {
                    key: "submittedBy.type",
                    label: "Submitter Type",
                    get: |r| r.submitted_by.as_ref().and_then(|s| s.kind.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "submittedBy.designation",
                    label: "Designation / Certificate No.",
                    get: |r| r.submitted_by.as_ref().and_then(|s| s.designation.as_deref()),
                    ..FieldDef::TEXT
                },
                FieldDef {
                    key: "submittedBy.telephone",
                    label: "Telephone",
                    get: |r| r.submitted_by.as_ref().and_then(|s| s.telephone.as_deref()),
                    ..FieldDef::TEXT
                },
            ]]),
        },
    ],
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::pdf::layout::CONTENT_WIDTH;

    #[test]
    fn release_certificate_has_fourteen_numbered_blocks() {
        let numbers: HashSet<&str> = FORM_8130_3
            .blocks
            .iter()
            .map(|b| b.field.label.split('.').next().unwrap().trim_end_matches(char::is_alphabetic))
            .collect();
        let expected: Vec<String> = (1..=14).map(|n| n.to_string()).collect();
        let expected: HashSet<&str> = expected.iter().map(String::as_str).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn only_block_seven_overflows() {
        let overflowing: Vec<&str> = FORM_8130_3
            .blocks
            .iter()
            .filter(|b| b.overflows)
            .map(|b| b.field.key)
            .collect();
        assert_eq!(overflowing, vec!["block7"]);
    }

    #[test]
    fn grid_blocks_tile_without_overlap() {
        let blocks = FORM_8130_3.blocks;
        for (i, a) in blocks.iter().enumerate() {
            assert!(a.at.x + a.at.width <= CONTENT_WIDTH + 0.01, "{} too wide", a.field.key);
            for b in &blocks[i + 1..] {
                let disjoint = a.at.x + a.at.width <= b.at.x + 0.01
                    || b.at.x + b.at.width <= a.at.x + 0.01
                    || a.at.y + a.at.height <= b.at.y + 0.01
                    || b.at.y + b.at.height <= a.at.y + 0.01;
                assert!(disjoint, "{} overlaps {}", a.field.key, b.field.key);
            }
        }
    }

    #[test]
    fn attestation_ignores_the_record() {
        let block14 = FORM_8130_3.blocks.iter().find(|b| b.field.key == "block14").unwrap();
        let record = Form8130::default();
        assert_eq!(block14.field.display(&record), ATTESTATION);
    }

    #[test]
    fn flow_keys_are_unique() {
        for keys in [
            FORM_337.fields().map(|f| f.key).collect::<Vec<_>>(),
            FORM_8010_4.fields().map(|f| f.key).collect::<Vec<_>>(),
        ] {
            let unique: HashSet<&str> = keys.iter().copied().collect();
            assert_eq!(unique.len(), keys.len());
        }
    }

    #[test]
    fn absent_sub_record_renders_dashes() {
        let record = Form337::default();
        for field in FORM_337.fields() {
            let shown = field.display(&record);
            match field.kind {
                FieldKind::Choice(_) => assert!(!shown.contains("[X]"), "{}", field.key),
                _ => assert_eq!(shown, "-", "{}", field.key),
            }
        }
    }

    #[test]
    fn choice_marks_the_matching_option() {
        assert_eq!(choice_line(REPAIR_TYPES, Some("repair")), "[X] Repair     [ ] Alteration");
        assert_eq!(choice_line(REPAIR_TYPES, Some("Overhaul")), "[ ] Repair     [ ] Alteration");
        let units = choice_line(UNIT_CLASSES, Some("AIRCRAFT"));
        assert!(units.starts_with("[X] Airframe"));
        assert_eq!(units.matches("[X]").count(), 1);
    }
}
