//! MeshStepComponent: VEGL processing step 6.
//!
//! Reads the padded region, cell sizes and inversion depth off the job
//! parameters object named by `paramsInstance`, derives the number of cells
//! along each axis and writes a UBC-GIF mesh file. A failed write prints the
//! error and exits the generated script with status 1.

use crate::pipeline::emitter::{python, TextEmitter};
use crate::pipeline::error::PipelineResult;
use crate::pipeline::node::{ScriptComponent, ValueReader};
use crate::pipeline::nodes::BOUND_NAMES;
use crate::pipeline::schema::{DefaultValue, FieldDescriptor, FieldType};

pub static SCHEMA: &[FieldDescriptor] = &[
    FieldDescriptor::required(
        "paramsInstance",
        "Python VEGL Parameters Instance",
        FieldType::Identifier,
    )
    .with_default(DefaultValue::Str("VEGLParams"))
    .reserving(BOUND_NAMES),
    FieldDescriptor::required("meshFile", "Mesh File Name", FieldType::Text)
        .with_default(DefaultValue::Str("mesh.msh")),
];

pub static IMPORTS: &[&str] = &["sys"];

/// Number of whole cells of size `cell` spanning `min..max`.
///
/// Matches the floor division the emitted fragment performs in Python.
pub fn cell_count(min: f64, max: f64, cell: f64) -> i64 {
    ((max - min) / cell).floor() as i64
}

/// Mesh definition step.
#[derive(Debug, Clone)]
pub struct MeshStepComponent {
    params_instance: String,
    mesh_file: String,
}

impl ScriptComponent for MeshStepComponent {
    fn from_values(values: &ValueReader<'_>) -> PipelineResult<Self> {
        Ok(Self {
            params_instance: values.identifier("paramsInstance")?.to_string(),
            mesh_file: values.text("meshFile")?.to_string(),
        })
    }

    fn emit(&self, out: &mut TextEmitter<'_>) {
        let params = &self.params_instance;

        out.comment("Step 6: define the inversion mesh");
        out.comment("--- Scientific description below ---");
        out.comment("Defines the mesh parameters and writes out a UBC-GIF mesh file.");
        out.comment(
            "Mesh is defined by the minimum and maximum eastings and northings, \
             inversion depth, and respective cell sizes.",
        );
        out.comment(format!(
            "Mesh file name: {}",
            python::string_literal(&self.mesh_file)
        ));

        out.line(format!("VEGLPaddedBox = {params}.getPaddedBounds()"));
        out.line("minEasting = VEGLPaddedBox.getMinEasting()");
        out.line("maxEasting = VEGLPaddedBox.getMaxEasting()");
        out.line("minNorthing = VEGLPaddedBox.getMinNorthing()");
        out.line("maxNorthing = VEGLPaddedBox.getMaxNorthing()");
        out.line(format!("invDepth = {params}.getInversionDepth()"));
        out.line(format!("cell_x = {params}.getCellX()"));
        out.line(format!("cell_y = {params}.getCellY()"));
        out.line(format!("cell_z = {params}.getCellZ()"));

        out.line("num_x_cells = int((maxEasting - minEasting) // cell_x)");
        out.line("num_y_cells = int((maxNorthing - minNorthing) // cell_y)");
        out.line("num_z_cells = int(invDepth // cell_z)");
        out.line(
            "print('Number of cells in x dimension: ' + str(num_x_cells) + \
             ', number of cells in y dimension: ' + str(num_y_cells) + \
             ' and number of cells in z dimension: ' + str(num_z_cells))",
        );

        out.comment("Define mesh file name here");
        out.line(format!("mesh = {}", python::string_literal(&self.mesh_file)));
        out.block("try:", |out| {
            out.line("f = open(mesh, 'w')");
            out.line(r"f.write(str(num_x_cells) + ' ' + str(num_y_cells) + ' ' + str(num_z_cells) + '\n')");
            out.line(r"f.write(str(minEasting) + ' ' + str(minNorthing) + ' 0\n')");
            out.line(r"f.write(str(num_x_cells) + '*' + str(cell_x) + '\n')");
            out.line(r"f.write(str(num_y_cells) + '*' + str(cell_y) + '\n')");
            out.line("f.write(str(num_z_cells) + '*' + str(cell_z))");
            out.line("f.close()");
        });
        out.block("except IOError as e:", |out| {
            out.line("print(e)");
            out.line("sys.exit(1)");
        });
        out.blank();
    }
}
