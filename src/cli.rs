//! CLI: installed jsii packages → declarative template schema
use std::io::Write;
use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;

use crate::generator::{self, GeneratorConfig};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate a JSON schema for declarative CDK templates from the type metadata of installed dependencies
#[derive(Parser, Debug)]
#[command(name = "decdk-schema", version)]
pub struct CommandLineInterface {
    /// package descriptor whose `dependencies` are inspected
    #[arg(long, default_value = "package.json")]
    package_json: PathBuf,

    /// base CloudFormation schema to extend (defaults to `cloudformation.schema.json` next to the package descriptor)
    #[arg(long)]
    base_schema: Option<PathBuf>,

    /// fully-qualified name of the construct base class
    #[arg(long, default_value = "@aws-cdk/cdk.Construct")]
    construct_base: String,

    /// fully-qualified name of the low-level resource base class (its subclasses are excluded)
    #[arg(long, default_value = "@aws-cdk/cdk.Resource")]
    resource_base: String,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            construct_base: self.construct_base.clone(),
            resource_base: self.resource_base.clone(),
        }
    }

    fn base_schema_path(&self) -> anyhow::Result<PathBuf> {
        match &self.base_schema {
            Some(path) => Ok(path.clone()),
            None => Ok(generator::package_dir(&self.package_json)?.join("cloudformation.schema.json")),
        }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        // 1) type system of every installed dependency
        let type_system = generator::load_type_system(&self.package_json)
            .with_context(|| format!("failed to load type metadata for {}", self.package_json.display()))?;

        // 2) base schema skeleton
        let base_schema_path = self.base_schema_path()?;
        let base_schema: serde_json::Value = crate::path_de::read_json_file(&base_schema_path)
            .context("failed to load base schema")?;

        // 3) filter, render & merge
        let schema = generator::generate(&type_system, base_schema, &self.config())?;
        let schema_src = generator::render(&schema);

        if let Some(out) = self.out.as_ref() {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, &schema_src)
                .with_context(|| format!("failed to write {}", out.display()))?;
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(schema_src.as_bytes())?;
            stdout.flush()?;
        }
        Ok(())
    }
}
