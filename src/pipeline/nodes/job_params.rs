//! JobParamsComponent: the in-script job parameters object.
//!
//! Generates a small getter class from the job's configured region, cell
//! sizes and inversion depth, then instantiates it under `paramsInstance`.
//! Processing steps such as [`super::MeshStepComponent`] read from that
//! instance by name.

use crate::pipeline::emitter::{python, TextEmitter};
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::node::{ScriptComponent, ValueReader};
use crate::pipeline::nodes::BOUND_NAMES;
use crate::pipeline::nodes::mesh_step::cell_count;
use crate::pipeline::schema::{DefaultValue, FieldDescriptor, FieldType};
use crate::pipeline::value::{ConfigValue, Values};

pub static SCHEMA: &[FieldDescriptor] = &[
    FieldDescriptor::required(
        "paramsInstance",
        "Python VEGL Parameters Instance",
        FieldType::Identifier,
    )
    .with_default(DefaultValue::Str("VEGLParams"))
    .reserving(BOUND_NAMES),
    FieldDescriptor::required("paddingMinEasting", "Padded Min Easting", FieldType::Float),
    FieldDescriptor::required("paddingMaxEasting", "Padded Max Easting", FieldType::Float),
    FieldDescriptor::required("paddingMinNorthing", "Padded Min Northing", FieldType::Float),
    FieldDescriptor::required("paddingMaxNorthing", "Padded Max Northing", FieldType::Float),
    FieldDescriptor::required("cellX", "Cell X Size (m)", FieldType::Int).positive(),
    FieldDescriptor::required("cellY", "Cell Y Size (m)", FieldType::Int).positive(),
    FieldDescriptor::required("cellZ", "Cell Z Size (m)", FieldType::Int).positive(),
    FieldDescriptor::required("inversionDepth", "Inversion Depth (m)", FieldType::Int).positive(),
    FieldDescriptor::optional("mgaZone", "MGA Zone", FieldType::Text),
];

/// (minimum, maximum) field pairs of the padded region.
const BOUND_PAIRS: [(&str, &str); 2] = [
    ("paddingMinEasting", "paddingMaxEasting"),
    ("paddingMinNorthing", "paddingMaxNorthing"),
];

const BANNER: &str = "----- Autogenerated VEGL Job Parameters -----";
const FOOTER: &str = "---------------------------------------------";

/// Padded region of interest, in MGA eastings/northings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddedBounds {
    pub min_easting: f64,
    pub max_easting: f64,
    pub min_northing: f64,
    pub max_northing: f64,
}

/// Check that every padded maximum exceeds its minimum.
///
/// Pairs with a side still unset are skipped; completeness is checked at
/// render time.
pub fn check_bounds(node: &str, values: &Values) -> PipelineResult<()> {
    for (min_key, max_key) in BOUND_PAIRS {
        let min = values.get(min_key).and_then(ConfigValue::as_float);
        let max = values.get(max_key).and_then(ConfigValue::as_float);
        if let (Some(min), Some(max)) = (min, max) {
            if max <= min {
                return Err(PipelineError::configuration(
                    node,
                    max_key,
                    format!("must be greater than {min_key}"),
                ));
            }
        }
    }
    Ok(())
}

/// Job parameters object emitter.
#[derive(Debug, Clone)]
pub struct JobParamsComponent {
    instance: String,
    bounds: PaddedBounds,
    cell_x: i64,
    cell_y: i64,
    cell_z: i64,
    inversion_depth: i64,
    mga_zone: Option<String>,
}

impl JobParamsComponent {
    /// Cell counts along x, y and z as the mesh step will compute them.
    pub fn mesh_dimensions(&self) -> (i64, i64, i64) {
        (
            cell_count(self.bounds.min_easting, self.bounds.max_easting, self.cell_x as f64),
            cell_count(self.bounds.min_northing, self.bounds.max_northing, self.cell_y as f64),
            cell_count(0.0, self.inversion_depth as f64, self.cell_z as f64),
        )
    }
}

impl ScriptComponent for JobParamsComponent {
    fn from_values(values: &ValueReader<'_>) -> PipelineResult<Self> {
        let bounds = PaddedBounds {
            min_easting: values.float("paddingMinEasting")?,
            max_easting: values.float("paddingMaxEasting")?,
            min_northing: values.float("paddingMinNorthing")?,
            max_northing: values.float("paddingMaxNorthing")?,
        };

        check_bounds(values.node(), values.values())?;

        Ok(Self {
            instance: values.identifier("paramsInstance")?.to_string(),
            bounds,
            cell_x: values.int("cellX")?,
            cell_y: values.int("cellY")?,
            cell_z: values.int("cellZ")?,
            inversion_depth: values.int("inversionDepth")?,
            mga_zone: values.optional_text("mgaZone")?.map(str::to_string),
        })
    }

    fn emit(&self, out: &mut TextEmitter<'_>) {
        const CORNERS: [&str; 4] = ["MinEasting", "MaxEasting", "MinNorthing", "MaxNorthing"];

        out.comment(BANNER);
        out.block("class VEGLBBox:", |out| {
            out.block(
                "def __init__(self, minEasting, maxEasting, minNorthing, maxNorthing):",
                |out| {
                    for corner in CORNERS {
                        let arg = lower_first(corner);
                        out.line(format!("self._{arg} = {arg}"));
                    }
                },
            );
            for corner in CORNERS {
                out.blank();
                out.block(format!("def get{corner}(self):"), |out| {
                    out.line(format!("return self._{}", lower_first(corner)));
                });
            }
        });
        out.blank();

        // Bounds are checked finite when parsed.
        let literal = |v: f64| python::float_literal(v).unwrap_or_else(|_| "0.0".to_string());
        let b = &self.bounds;
        let getters = [
            (
                "getPaddedBounds",
                format!(
                    "VEGLBBox({}, {}, {}, {})",
                    literal(b.min_easting),
                    literal(b.max_easting),
                    literal(b.min_northing),
                    literal(b.max_northing)
                ),
            ),
            ("getInversionDepth", self.inversion_depth.to_string()),
            ("getCellX", self.cell_x.to_string()),
            ("getCellY", self.cell_y.to_string()),
            ("getCellZ", self.cell_z.to_string()),
            (
                "getMgaZone",
                self.mga_zone
                    .as_deref()
                    .map(python::string_literal)
                    .unwrap_or_else(|| "None".to_string()),
            ),
        ];

        out.block("class VEGLParameters:", |out| {
            for (i, (getter, value)) in getters.iter().enumerate() {
                if i > 0 {
                    out.blank();
                }
                out.block(format!("def {getter}(self):"), |out| {
                    out.line(format!("return {value}"));
                });
            }
        });
        out.blank();

        let (nx, ny, nz) = self.mesh_dimensions();
        out.comment(format!("Expected mesh: {nx} x {ny} x {nz} cells"));
        out.line(format!("{} = VEGLParameters()", self.instance));
        out.comment(FOOTER);
        out.blank();
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
