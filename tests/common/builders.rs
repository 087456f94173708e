//! Test data builders for creating test objects

use scriptbuilder_rs::{ComponentCatalog, ComponentKind, ConfigValue, Pipeline, Values};

/// Builder for job parameter values
pub struct JobValuesBuilder {
    values: Values,
}

impl JobValuesBuilder {
    /// Region 0..100 x 0..50, 25m cells, 200m deep
    pub fn new() -> Self {
        let mut values = Values::new();
        values.insert("paddingMinEasting".into(), ConfigValue::Float(0.0));
        values.insert("paddingMaxEasting".into(), ConfigValue::Float(100.0));
        values.insert("paddingMinNorthing".into(), ConfigValue::Float(0.0));
        values.insert("paddingMaxNorthing".into(), ConfigValue::Float(50.0));
        values.insert("cellX".into(), ConfigValue::Int(25));
        values.insert("cellY".into(), ConfigValue::Int(25));
        values.insert("cellZ".into(), ConfigValue::Int(25));
        values.insert("inversionDepth".into(), ConfigValue::Int(200));
        Self { values }
    }

    pub fn instance(mut self, name: &str) -> Self {
        self.values
            .insert("paramsInstance".into(), ConfigValue::from(name));
        self
    }

    pub fn easting(mut self, min: f64, max: f64) -> Self {
        self.values
            .insert("paddingMinEasting".into(), ConfigValue::Float(min));
        self.values
            .insert("paddingMaxEasting".into(), ConfigValue::Float(max));
        self
    }

    pub fn cell_x(mut self, cell: i64) -> Self {
        self.values.insert("cellX".into(), ConfigValue::Int(cell));
        self
    }

    pub fn build(self) -> Values {
        self.values
    }
}

impl Default for JobValuesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for pipelines using the built-in catalog
pub struct PipelineBuilder {
    catalog: ComponentCatalog,
    pipeline: Pipeline,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            catalog: ComponentCatalog::builtin(),
            pipeline: Pipeline::new(),
        }
    }

    pub fn node(mut self, kind: ComponentKind) -> Self {
        self.pipeline
            .add_node(&self.catalog, kind, Values::new())
            .expect("node should be added");
        self
    }

    pub fn node_with(mut self, kind: ComponentKind, values: Values) -> Self {
        self.pipeline
            .add_node(&self.catalog, kind, values)
            .expect("node should be added");
        self
    }

    /// AWS helpers, job parameters and the mesh step, in that order
    pub fn standard_job(self) -> Self {
        self.node(ComponentKind::AwsUtils)
            .node_with(ComponentKind::JobParameters, JobValuesBuilder::new().build())
            .node(ComponentKind::MeshStep)
    }

    pub fn build(self) -> Pipeline {
        self.pipeline
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
