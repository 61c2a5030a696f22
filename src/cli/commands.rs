//! Subcommand handlers for generate, session and config actions.

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::runtime::Runtime;

use super::args::{ConfigAction, GenerateArgs, SessionArgs, VideoOptions};
use crate::banner::BannerField;
use crate::config::{default_path as get_config_path, Config};
use crate::editor::{PointerEvent, Rect};
use crate::genai::{GenAiClient, GenerationBackend};
use crate::studio::{
    KeySelector, LineSource, PromptKeySelector, SessionCommand, Studio, StudioError,
    VideoSettings, VideoState, DEFAULT_CONTAINER, SESSION_HELP,
};

fn load_config(config_path: Option<&Path>) -> Result<Config, String> {
    Config::load(config_path).map_err(|e| e.to_string())
}

fn video_settings(config: &Config, options: &VideoOptions) -> VideoSettings {
    let mut settings = config.video_settings();
    if let Some(secs) = options.poll_interval {
        settings.poll_interval = std::time::Duration::from_secs(secs);
    }
    if let Some(dir) = &options.video_dir {
        settings.output_dir = dir.clone();
    }
    settings
}

fn build_studio<L: LineSource>(
    config: &Config,
    options: &VideoOptions,
    key_input: L,
) -> Result<Studio<GenAiClient, PromptKeySelector<L>>, String> {
    let keys = PromptKeySelector::new(config.api.api_key_env.clone(), key_input);
    let client = config
        .client(keys.key_source())
        .map_err(|e| format!("Failed to create generation client: {}", e))?;
    let banner = config.banner_config().map_err(|e| e.to_string())?;

    Ok(Studio::new(Arc::new(client), keys, video_settings(config, options)).with_config(banner))
}

/// Run the generate command: one banner image, optionally animated.
pub fn run_generate(args: GenerateArgs, config_path: Option<&Path>) -> Result<(), String> {
    let config = load_config(config_path)?;
    let mut studio = build_studio(&config, &args.video_options, io::stdin())?;

    let mut fields = Vec::new();
    if let Some(festival) = &args.festival {
        fields.push(BannerField::FestivalName(festival.clone()));
    }
    if !args.offers.is_empty() {
        fields.push(BannerField::Offers(args.offers.join("\n")));
    }
    if let Some(shop) = &args.shop {
        fields.push(BannerField::ShopName(shop.clone()));
    }
    if let Some(accent) = &args.accent {
        fields.push(BannerField::AccentColor(accent.clone()));
    }
    for field in fields {
        studio.update(field).map_err(|e| e.to_string())?;
    }
    for text in &args.texts {
        studio.add_custom_text(text);
    }

    if args.video && !studio.key_ready() {
        return Err(format!(
            "{} environment variable is not set.\n\n\
            Add your API key to a .env file:\n\
                echo '{}=your-api-key-here' >> .env",
            config.api.api_key_env, config.api.api_key_env
        ));
    }

    let rt = Runtime::new().map_err(|e| format!("Failed to create async runtime: {}", e))?;
    let _guard = rt.enter();

    if let Some(logo) = &args.logo {
        if !studio.load_logo_file(logo).map_err(|e| e.to_string())? {
            return Err(format!("Not an image file: {}", logo.display()));
        }
        if args.remove_bg {
            println!("Removing logo background...");
            rt.block_on(studio.remove_logo_background());
            if let Some(error) = studio.logo_error() {
                eprintln!("Warning: {}", error);
            }
        }
    }

    println!("Generating banner for \"{}\"...", studio.config().festival_name);
    rt.block_on(studio.generate_banner());
    if let Some(error) = &studio.result().error {
        return Err(error.clone());
    }

    if args.video {
        studio.start_video().map_err(|e| e.to_string())?;
        println!("Generating video... This can take a few minutes.");
        match rt.block_on(studio.wait_for_video()) {
            Some(VideoState::Succeeded { video }) => println!("Video ready: {}", video.display()),
            Some(VideoState::Failed { message, .. }) => eprintln!("Warning: {}", message),
            _ => {}
        }
    }

    write_html(&args.output, &studio.render_html())
        .map_err(|e| format!("Failed to write {}: {}", args.output.display(), e))?;
    println!("Banner written to {}", args.output.display());
    Ok(())
}

/// Run the interactive session on stdin/stdout.
pub fn run_session(args: SessionArgs, config_path: Option<&Path>) -> Result<(), String> {
    let config = load_config(config_path)?;
    let mut studio = build_studio(&config, &args.video_options, io::stdin())?;
    let rt = Runtime::new().map_err(|e| format!("Failed to create async runtime: {}", e))?;

    if !studio.key_ready() {
        println!(
            "No API key found in {}. Use /key to enter one.",
            config.api.api_key_env
        );
    }
    println!("Type /help for commands.");

    let mut input = io::stdin();
    let mut stdout = io::stdout();
    run_session_loop(&rt, &mut studio, &mut input, &mut stdout, &args.output)
        .map_err(|e| format!("Session I/O error: {}", e))
}

/// Read and execute session commands until `/quit` or end of input.
///
/// Video jobs run on `rt` in the background; their outcome is reported
/// before the next prompt.
pub fn run_session_loop<B, K, L, W>(
    rt: &Runtime,
    studio: &mut Studio<B, K>,
    input: &mut L,
    out: &mut W,
    default_output: &Path,
) -> io::Result<()>
where
    B: GenerationBackend,
    K: KeySelector,
    L: LineSource,
    W: Write,
{
    let _guard = rt.enter();
    let mut session = Session {
        container: DEFAULT_CONTAINER,
        default_output: default_output.to_path_buf(),
    };

    loop {
        report_video(studio.refresh_video(), out)?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = input.next_line()? else {
            break;
        };
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };

        if session.execute(rt, studio, command, out)?.is_break() {
            break;
        }
    }

    if studio.cancel_video() {
        writeln!(out, "Video generation cancelled.")?;
    }
    Ok(())
}

struct Session {
    container: Rect,
    default_output: PathBuf,
}

impl Session {
    fn execute<B, K, W>(
        &mut self,
        rt: &Runtime,
        studio: &mut Studio<B, K>,
        command: SessionCommand,
        out: &mut W,
    ) -> io::Result<ControlFlow<()>>
    where
        B: GenerationBackend,
        K: KeySelector,
        W: Write,
    {
        match command {
            SessionCommand::Set(field) => match studio.update(field) {
                Ok(()) => writeln!(out, "Updated.")?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            SessionCommand::Logo(path) => match studio.load_logo_file(&path) {
                Ok(true) => writeln!(out, "Logo loaded.")?,
                Ok(false) => writeln!(out, "Not an image file: {}", path.display())?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            SessionCommand::RemoveBackground => {
                if studio.config().logo.is_none() {
                    writeln!(out, "Load a logo first with /logo <path>.")?;
                } else {
                    writeln!(out, "Removing background...")?;
                    rt.block_on(studio.remove_logo_background());
                    match studio.logo_error() {
                        Some(error) => writeln!(out, "{}", error)?,
                        None => writeln!(out, "Logo background removed.")?,
                    }
                }
            }
            SessionCommand::AddText(text) => match studio.add_custom_text(&text) {
                Some(id) => writeln!(out, "Added text {}.", id)?,
                None => writeln!(out, "Text is empty.")?,
            },
            SessionCommand::RemoveText(id) => {
                if studio.remove_custom_text(id) {
                    writeln!(out, "Removed text {}.", id)?;
                } else {
                    writeln!(out, "No text with id {}.", id)?;
                }
            }
            SessionCommand::ListTexts => {
                if studio.texts().is_empty() {
                    writeln!(out, "No custom text.")?;
                }
                for item in studio.texts().iter() {
                    writeln!(
                        out,
                        "  {}  \"{}\" at ({}, {}) size {}rem",
                        item.id,
                        item.text,
                        item.position.x,
                        item.position.y,
                        item.size.rem()
                    )?;
                }
            }
            SessionCommand::Generate => {
                writeln!(out, "Generating your beautiful banner...")?;
                rt.block_on(studio.generate_banner());
                match &studio.result().error {
                    Some(error) => writeln!(out, "{}", error)?,
                    None => writeln!(out, "Banner image generated.")?,
                }
            }
            SessionCommand::Video => match studio.start_video() {
                Ok(()) => writeln!(
                    out,
                    "Generating your video... This can take a few minutes."
                )?,
                Err(StudioError::KeyNotSelected) => writeln!(
                    out,
                    "{} Use /key to select one.",
                    StudioError::KeyNotSelected
                )?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            SessionCommand::Wait => match rt.block_on(studio.wait_for_video()) {
                Some(state) => report_video(state, out)?,
                None => writeln!(out, "No video in progress.")?,
            },
            SessionCommand::Cancel => {
                if studio.cancel_video() {
                    writeln!(out, "Video generation cancelled.")?;
                } else {
                    writeln!(out, "No video in progress.")?;
                }
            }
            SessionCommand::SelectKey => match studio.select_api_key(out) {
                Ok(true) => writeln!(out, "API key selected.")?,
                Ok(false) => writeln!(out, "No API key selected.")?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            SessionCommand::Down { target, at } => {
                self.pointer(studio, PointerEvent::Down { target, at }, out)?
            }
            SessionCommand::Move { at } => self.pointer(studio, PointerEvent::Move { at }, out)?,
            SessionCommand::Up => self.pointer(studio, PointerEvent::Up, out)?,
            SessionCommand::Leave => self.pointer(studio, PointerEvent::Leave, out)?,
            SessionCommand::Click { target } => {
                self.pointer(studio, PointerEvent::Click { target }, out)?
            }
            SessionCommand::RightClick { target } => {
                self.pointer(studio, PointerEvent::ContextMenu { target }, out)?
            }
            SessionCommand::Container(rect) => {
                self.container = rect;
                writeln!(out, "Container set.")?;
            }
            SessionCommand::Render(path) => {
                let path = path.unwrap_or_else(|| self.default_output.clone());
                match write_html(&path, &studio.render_html()) {
                    Ok(()) => writeln!(out, "Banner written to {}", path.display())?,
                    Err(e) => writeln!(out, "Failed to write {}: {}", path.display(), e)?,
                }
            }
            SessionCommand::Status => print_status(studio, out)?,
            SessionCommand::Help => writeln!(out, "{}", SESSION_HELP)?,
            SessionCommand::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn pointer<B, K, W>(
        &self,
        studio: &mut Studio<B, K>,
        event: PointerEvent,
        out: &mut W,
    ) -> io::Result<()>
    where
        B: GenerationBackend,
        K: KeySelector,
        W: Write,
    {
        if !studio.handle_pointer(event, self.container) {
            writeln!(out, "Ignored.")?;
        }
        Ok(())
    }
}

fn report_video<W: Write>(state: VideoState, out: &mut W) -> io::Result<()> {
    match state {
        VideoState::Succeeded { video } => writeln!(out, "Video ready: {}", video.display()),
        VideoState::Failed { message, .. } => writeln!(out, "{}", message),
        _ => Ok(()),
    }
}

fn print_status<B, K, W>(studio: &Studio<B, K>, out: &mut W) -> io::Result<()>
where
    B: GenerationBackend,
    K: KeySelector,
    W: Write,
{
    let config = studio.config();
    let result = studio.result();
    let yes_no = |b: bool| if b { "yes" } else { "no" };

    writeln!(out, "Festival:    {}", config.festival_name)?;
    writeln!(out, "Shop:        {}", config.shop_name)?;
    writeln!(out, "Accent:      {}", config.accent_color)?;
    writeln!(out, "Logo:        {}", yes_no(config.logo.is_some()))?;
    writeln!(out, "Texts:       {}", studio.texts().len())?;
    writeln!(out, "API key:     {}", yes_no(studio.key_ready()))?;
    writeln!(out, "Image:       {}", yes_no(result.image.is_some()))?;
    match &result.video {
        Some(video) => writeln!(out, "Video:       {}", video.display())?,
        None => writeln!(
            out,
            "Video:       {}",
            if result.is_generating_video {
                "generating"
            } else {
                "none"
            }
        )?,
    }
    if let Some(error) = &result.error {
        writeln!(out, "Error:       {}", error)?;
    }
    if let Some(error) = &result.video_error {
        writeln!(out, "Video error: {}", error)?;
    }
    if let Some(error) = studio.logo_error() {
        writeln!(out, "Logo error:  {}", error)?;
    }
    Ok(())
}

fn write_html(path: &Path, html: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, html)
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config_path: Option<&Path>) -> Result<(), String> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            let config = load_config(Some(&path))?;
            println!("Current configuration:");
            println!();
            print!("{}", config.to_toml().map_err(|e| e.to_string())?);
            println!();

            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(format!(
                    "Config file already exists: {}\n\
                    Use 'festive-banner config show' to view current settings.",
                    path.display()
                ));
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creating config directory: {}", e))?;
            }

            let body = Config::default().to_toml().map_err(|e| e.to_string())?;
            let contents = format!(
                "# festive-banner configuration\n\
                # [banner] accepts festival_name, offers, accent_color, shop_name, address,\n\
                # email, website, mobile_number, alt_mobile_number, instagram_handle,\n\
                # facebook_handle. [output] accepts dir.\n\n{}",
                body
            );
            std::fs::write(&path, contents)
                .map_err(|e| format!("Error writing config file: {}", e))?;

            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}
