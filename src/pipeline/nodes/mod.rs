//! Built-in component implementations.

pub mod aws_utils;
pub mod job_params;
pub mod mesh_step;

pub use aws_utils::AwsUtilsComponent;
pub use job_params::JobParamsComponent;
pub use mesh_step::MeshStepComponent;

/// Top-level names the built-in fragments bind or call, plus the modules
/// they import. A configured instance name must not rebind any of them.
pub const BOUND_NAMES: &[&str] = &[
    // modules and builtins
    "sys", "subprocess", "print", "int", "str", "open", "IOError",
    // aws_utils
    "awsUpload", "awsDownload",
    // job_params
    "VEGLBBox", "VEGLParameters",
    // mesh_step
    "VEGLPaddedBox", "minEasting", "maxEasting", "minNorthing", "maxNorthing", "invDepth",
    "cell_x", "cell_y", "cell_z", "num_x_cells", "num_y_cells", "num_z_cells", "mesh", "f",
    "e",
];
