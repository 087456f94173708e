//! AwsUtilsComponent: reusable S3 transfer helpers.
//!
//! Emits two fixed function definitions, `awsUpload` and `awsDownload`, that
//! shell out to the `aws` command line tool. The fragment ignores the node's
//! values entirely.

use crate::pipeline::emitter::TextEmitter;
use crate::pipeline::error::PipelineResult;
use crate::pipeline::node::{ScriptComponent, ValueReader};
use crate::pipeline::schema::FieldDescriptor;

pub static SCHEMA: &[FieldDescriptor] = &[];

pub static IMPORTS: &[&str] = &["subprocess"];

const BANNER: &str = "----- Autogenerated AWS Utility Functions -----";
const FOOTER: &str = "-----------------------------------------------";

/// Stateless helper-function emitter.
#[derive(Debug, Default)]
pub struct AwsUtilsComponent;

impl ScriptComponent for AwsUtilsComponent {
    fn from_values(_values: &ValueReader<'_>) -> PipelineResult<Self> {
        Ok(AwsUtilsComponent)
    }

    fn emit(&self, out: &mut TextEmitter<'_>) {
        out.comment(BANNER);

        out.comment("Uploads inFilePath to the specified bucket with the specified key");
        out.block("def awsUpload(inFilePath, awsBucket, awsKey):", |out| {
            out.line(r#"queryPath = (awsBucket + "/" + awsKey).replace("//", "/")"#);
            out.line(
                r#"retcode = subprocess.call(["aws", "put", queryPath, inFilePath, "--set-acl=public-read"])"#,
            );
            out.line(
                r#"print("awsUpload: " + inFilePath + " to " + queryPath + " returned " + str(retcode))"#,
            );
        });
        out.blank();

        out.comment("Downloads the specified key from bucket and writes it to outFilePath");
        out.block("def awsDownload(awsBucket, awsKey, outFilePath):", |out| {
            out.line(r#"queryPath = (awsBucket + "/" + awsKey).replace("//", "/")"#);
            out.line(r#"retcode = subprocess.call(["aws", "get", queryPath, outFilePath])"#);
            out.line(
                r#"print("awsDownload: " + queryPath + " to " + outFilePath + " returned " + str(retcode))"#,
            );
        });

        out.comment(FOOTER);
        out.blank();
    }
}
