//! sitectl dotenv - Environment file scaffolding

use clap::{Args, Subcommand};

use crate::core::SiteResult;
use crate::dotenv::{DotenvGenerator, EnvParameters, DEFAULT_SITES_FILE};
use crate::orchestration::{
    Arguments, Command, ExecutionContext, ExitStatus, Options, RequestDescriptor,
};
use crate::utils::expand_home;

pub const INIT: &str = "dotenv:init";

#[derive(Args)]
pub struct DotenvArgs {
    #[command(subcommand)]
    pub command: DotenvCommands,
}

#[derive(Subcommand)]
pub enum DotenvCommands {
    /// Create .env, .gitignore and settings.php for the site
    Init(InitArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Read database credentials from the environment in settings.php
    #[arg(long)]
    pub load_from_env: bool,

    /// Include settings.local.php from settings.php
    #[arg(long)]
    pub load_settings: bool,

    /// Take parameters from a sites file
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_SITES_FILE)]
    pub load_from_yml: Option<String>,

    /// Entry of the sites file to use
    #[arg(long, default_value = "dev")]
    pub env: String,
}

impl DotenvArgs {
    pub fn into_request(self) -> RequestDescriptor {
        match self.command {
            DotenvCommands::Init(args) => {
                let request = RequestDescriptor::new(INIT)
                    .option("load-from-env", args.load_from_env)
                    .option("load-settings", args.load_settings)
                    .option("env", args.env);
                match args.load_from_yml {
                    Some(file) => request.option("load-from-yml", file),
                    None => request,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DotenvInitCommand {
    options: Options,
}

impl DotenvInitCommand {
    fn initial_parameters(&self, context: &ExecutionContext<'_>) -> SiteResult<EnvParameters> {
        let Some(file) = self.options.string("load-from-yml") else {
            return Ok(EnvParameters::default());
        };

        let env = self.options.string("env").unwrap_or_else(|| "dev".to_string());
        let path = expand_home(&file);

        match EnvParameters::from_sites_file(&path, &env)? {
            Some(parameters) => Ok(parameters),
            None => {
                context.io().warning(&format!(
                    "Environment '{}' not found in {}, using defaults",
                    env,
                    path.display()
                ));
                Ok(EnvParameters::default())
            }
        }
    }

    /// Let the user adjust every parameter
    fn interact(
        &self,
        context: &ExecutionContext<'_>,
        parameters: &mut EnvParameters,
    ) -> SiteResult<()> {
        for key in parameters.keys() {
            let current = if key == "server_root" {
                match parameters.get("drupal_root") {
                    Some(root) => format!("{}/web", root),
                    None => parameters.get(&key).unwrap_or_default().to_string(),
                }
            } else {
                parameters.get(&key).unwrap_or_default().to_string()
            };

            let value = context
                .io()
                .ask(&format!("Enter value for {}", key.to_uppercase()), &current)?;
            parameters.set(&key, value);
        }
        Ok(())
    }
}

impl Command for DotenvInitCommand {
    fn name(&self) -> &'static str {
        INIT
    }

    fn description(&self) -> &'static str {
        "Add support for .env files to the site"
    }

    fn configure(&mut self, _arguments: &Arguments, options: &Options) {
        self.options = options.clone();
    }

    fn execute(&self, context: &ExecutionContext<'_>) -> SiteResult<ExitStatus> {
        let flags = context.flags().overlay(&self.options);
        let mut parameters = self.initial_parameters(context)?;

        if !flags.skip_prompts() {
            self.interact(context, &mut parameters)?;
        }

        if let Some(file) = self.options.string("load-from-yml") {
            parameters.set("load_yml", file);
        }
        if self.options.flag("load-from-env") {
            parameters.set("load_from_env", "true");
        }
        if self.options.flag("load-settings") {
            parameters.set("load_settings", "true");
        }

        let docroot = context.config().docroot(context.site_root());
        DotenvGenerator::new(context.site_root(), docroot, context.io()).generate(&parameters)?;

        Ok(0)
    }
}
