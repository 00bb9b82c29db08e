use clap::{Args, Parser, Subcommand};
use rdecor::datauri::{self, extension_for_mime, DataUri};
use rdecor::logger::{self, LogLevel, LoggerConfig};
use rdecor::models::{
    EditDesignRequest, GenerationMode, PromptRequest, SaveProjectRequest, STYLE_PRESETS,
};
use rdecor::{BackendConfig, Config, DesignBackend, DesignClient, NoticeLevel, Outcome, Studio};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "rdecor", version, about = "AI interior design studio client")]
struct Cli {
    /// Backend base URL; overrides RDECOR_BACKEND_URL.
    #[arg(long, global = true)]
    backend: Option<String>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate designs from a prompt, a photo or a floor plan.
    Generate(GenerateArgs),
    /// Edit an existing image with free-text instructions.
    Edit(EditArgs),
    /// Talk to the design assistant. Reads stdin when no message is given.
    Chat { message: Option<String> },
    /// Ask for an edit idea for an image.
    SuggestEdits {
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        style: Option<String>,
    },
    /// Have the backend write a prompt for a style.
    NewPrompt {
        #[arg(long)]
        style: String,
        #[arg(long)]
        topic: Option<String>,
    },
    /// List the built-in style presets.
    Styles,
    /// Fetch backend summaries for one or more comma-separated styles.
    Recommend { style: String },
    /// Save a finished design as a project.
    SaveProject {
        #[arg(long)]
        name: String,
        /// URL of the final image.
        #[arg(long)]
        image: String,
        #[arg(long)]
        user: Option<String>,
        /// File holding the room geometry to store with the project.
        #[arg(long)]
        geometry: Option<PathBuf>,
    },
    /// List saved projects.
    Projects,
    #[cfg(feature = "flows")]
    #[command(subcommand)]
    Flow(FlowCommand),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[arg(long, default_value = "text")]
    mode: GenerationMode,
    #[arg(long)]
    prompt: Option<String>,
    #[arg(long)]
    style: Option<String>,
    /// Source photo (image mode) or floor plan (floorplan mode).
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct EditArgs {
    /// Image path, URL or data URI.
    #[arg(long)]
    image: String,
    #[arg(long)]
    prompt: String,
    #[arg(long)]
    style: Option<String>,
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[cfg(feature = "flows")]
#[derive(Debug, Subcommand)]
enum FlowCommand {
    ImagePrompt {
        topic: String,
    },
    FromPrompt {
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        style: String,
    },
    SummarizeStyles {
        styles: Vec<String>,
    },
    SuggestFromChat {
        query: String,
    },
    FloorPlan {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        style: String,
        #[arg(long)]
        prompt: Option<String>,
    },
}

type CliResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> CliResult<()> {
    let env_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Info };
    logger::init_with_config(
        LoggerConfig::new()
            .with_level(level)
            .with_json_output(cli.json_logs)
            .with_colors(!cli.json_logs),
    )?;
    if !env_loaded {
        log::debug!("No .env file found, using system environment variables");
    }

    let mut config = Config::from_env();
    if let Some(url) = cli.backend.clone() {
        config = config.with_backend(BackendConfig::from_env().with_base_url(url));
    }
    logger::log_config_info(&config);

    let client = DesignClient::from_config(&config)?;

    match cli.command {
        Command::Generate(args) => generate(client, &config, args).await,
        Command::Edit(args) => edit(&client, &config, args).await,
        Command::Chat { message } => chat(client, message).await,
        Command::SuggestEdits { image, style } => {
            let request = rdecor::models::SuggestEditsRequest {
                base_image: match image {
                    Some(image) => Some(image_reference(&image).await?),
                    None => None,
                },
                design_style: style.or_else(|| config.default_style.clone()),
            };
            let suggestion = client.suggest_edits(request).await.into_design_result()?;
            println!("{}", suggestion.data);
            Ok(())
        }
        Command::NewPrompt { style, topic } => {
            let generated = client
                .generate_prompt(PromptRequest { style, topic })
                .await
                .into_design_result()?;
            println!("{}", generated.data);
            Ok(())
        }
        Command::Styles => {
            for preset in STYLE_PRESETS {
                println!("{:<14}{}", preset.name, preset.summary);
            }
            Ok(())
        }
        Command::Recommend { style } => {
            let recommendations = client
                .assistant()
                .recommendations(&style)
                .await
                .into_design_result()?;
            for summary in recommendations.data {
                println!("- {}", summary);
            }
            Ok(())
        }
        Command::SaveProject {
            name,
            image,
            user,
            geometry,
        } => {
            let mut request = SaveProjectRequest::new(name, image);
            if let Some(user) = user {
                request = request.with_user(user);
            }
            if let Some(path) = geometry {
                request = request.with_geometry(tokio::fs::read_to_string(&path).await?);
            }
            let saved = client.projects().save_project(request).await.into_design_result()?;
            println!("{} (id {})", saved.message, saved.project_id);
            Ok(())
        }
        Command::Projects => {
            let projects = client.projects().list_projects().await.into_design_result()?;
            if projects.is_empty() {
                println!("No saved projects");
            }
            for project in projects {
                println!(
                    "{:>4}  {:<24}{:<12}{}  {}",
                    project.id,
                    project.project_name,
                    project.user_id,
                    project.created_at.format("%Y-%m-%d %H:%M"),
                    project.final_image_url
                );
            }
            Ok(())
        }
        #[cfg(feature = "flows")]
        Command::Flow(command) => flow(&client, &config, command).await,
    }
}

fn print_notices(studio: &Studio) {
    for notice in studio.take_notices() {
        match notice.level {
            NoticeLevel::Error => eprintln!("{}: {}", notice.title, notice.message),
            NoticeLevel::Info => println!("{}: {}", notice.title, notice.message),
        }
    }
}

async fn generate(client: DesignClient, config: &Config, args: GenerateArgs) -> CliResult<()> {
    let studio = Studio::new(Arc::new(client));
    studio.set_mode(args.mode);
    if let Some(prompt) = args.prompt {
        studio.set_prompt(prompt);
    }
    if let Some(style) = args.style.or_else(|| config.default_style.clone()) {
        studio.set_style(style);
    }
    match args.mode {
        GenerationMode::Image => studio.select_source_file(args.file),
        GenerationMode::FloorPlan => studio.select_floor_plan(args.file),
        GenerationMode::Text => {
            if args.file.is_some() {
                log::warn!("--file is ignored in text mode");
            }
        }
    }

    let outcome = studio.generate().await;
    print_notices(&studio);
    if let Outcome::Applied(result) = outcome? {
        if let Some(final_prompt) = result.final_prompt.filter(|p| !p.is_empty()) {
            log::info!("Backend prompt: {}", final_prompt);
        }
        let out_dir = output_dir(args.out_dir, config);
        save_images(&result.data, &out_dir).await?;
    }
    Ok(())
}

async fn edit(client: &DesignClient, config: &Config, args: EditArgs) -> CliResult<()> {
    let request = EditDesignRequest {
        base_image: image_reference(&args.image).await?,
        edit_prompt: args.prompt,
        design_style: args.style.or_else(|| config.default_style.clone()),
    };
    let edited = client.edit_design(request).await.into_design_result()?;
    match edited.edited_images.first() {
        Some(image) => save_images(std::slice::from_ref(image), &output_dir(args.out_dir, config)).await,
        None => Err("backend returned no edited image".into()),
    }
}

async fn chat(client: DesignClient, message: Option<String>) -> CliResult<()> {
    let studio = Studio::new(Arc::new(client));
    if let Some(message) = message {
        let reply = studio.send_chat(&message).await;
        print_notices(&studio);
        println!("{}", reply?);
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(reply) = studio.send_chat(&line).await {
            println!("{}", reply);
        }
        print_notices(&studio);
    }
    Ok(())
}

#[cfg(feature = "flows")]
async fn flow(client: &DesignClient, config: &Config, command: FlowCommand) -> CliResult<()> {
    use rdecor::models::{
        ChatSuggestionRequest, FloorPlanDesignRequest, ImagePromptRequest, PromptDesignRequest,
        SummarizeStylesRequest,
    };

    let flows = client.flows();
    match command {
        FlowCommand::ImagePrompt { topic } => {
            let response = flows
                .generate_image_prompt(ImagePromptRequest { topic })
                .await
                .into_design_result()?;
            println!("{}", response.generated_prompt);
        }
        FlowCommand::FromPrompt { prompt, style } => {
            let response = flows
                .generate_design_from_prompt(PromptDesignRequest {
                    prompt,
                    design_style: style,
                })
                .await
                .into_design_result()?;
            save_images(&response.image_urls, &output_dir(None, config)).await?;
        }
        FlowCommand::SummarizeStyles { styles } => {
            let response = flows
                .summarize_design_styles(SummarizeStylesRequest {
                    design_styles: styles,
                })
                .await
                .into_design_result()?;
            for summary in response.summaries {
                println!("- {}", summary);
            }
        }
        FlowCommand::SuggestFromChat { query } => {
            let response = flows
                .design_suggestions_from_chat(ChatSuggestionRequest { query })
                .await
                .into_design_result()?;
            println!("{}", response.suggestion);
        }
        FlowCommand::FloorPlan { file, style, prompt } => {
            let plan = DataUri::image_from_file(&file).await?;
            let response = flows
                .generate_from_floor_plan(FloorPlanDesignRequest {
                    cad_floor_plan_data_uri: plan.into_string(),
                    design_style: style,
                    prompt,
                })
                .await
                .into_design_result()?;
            save_images(&response.generated_image_urls, &output_dir(None, config)).await?;
        }
    }
    Ok(())
}

/// Paths are read into data URIs; URLs and data URIs pass through.
async fn image_reference(value: &str) -> CliResult<String> {
    if datauri::is_data_uri(value) || value.starts_with("http://") || value.starts_with("https://") {
        return Ok(value.to_string());
    }
    Ok(DataUri::image_from_file(value).await?.into_string())
}

fn output_dir(arg: Option<PathBuf>, config: &Config) -> PathBuf {
    arg.or_else(|| config.output_dir.clone().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

async fn save_images(images: &[String], out_dir: &Path) -> CliResult<()> {
    if images.is_empty() {
        log::warn!("Backend returned no images");
        return Ok(());
    }
    tokio::fs::create_dir_all(out_dir).await?;
    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");

    for (index, image) in images.iter().enumerate() {
        if !datauri::is_data_uri(image) {
            println!("{}", image);
            continue;
        }
        let uri = DataUri::parse(image.clone())?;
        let filename = format!("design_{}_{}.{}", stamp, index + 1, extension_for_mime(uri.mime()));
        let path = out_dir.join(filename);
        tokio::fs::write(&path, uri.decode()?).await?;
        log::info!("💾 Saved {}", path.display());
        println!("{}", path.display());
    }
    Ok(())
}
