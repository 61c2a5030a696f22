//! SessionCommand - line commands for the interactive banner session.
//!
//! Plain text adds a custom text overlay. Lines starting with `/` are
//! commands that edit the form, drive generation or simulate pointer input.

use std::path::PathBuf;

use crate::banner::BannerField;
use crate::editor::{DragTarget, Point, Rect, SizeTarget};

/// One parsed session line.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Update a form field.
    Set(BannerField),
    /// Load a logo image from disk.
    Logo(PathBuf),
    /// Remove the logo background.
    RemoveBackground,
    /// Add a custom text overlay.
    AddText(String),
    /// Remove a custom text overlay by id.
    RemoveText(u64),
    /// List custom text overlays.
    ListTexts,
    /// Generate the banner image.
    Generate,
    /// Start generating a video from the current image.
    Video,
    /// Block until the running video job finishes.
    Wait,
    /// Cancel the running video job.
    Cancel,
    /// Select an API key.
    SelectKey,
    /// Pointer press on a draggable overlay.
    Down { target: DragTarget, at: Point },
    Move { at: Point },
    Up,
    Leave,
    /// Primary click on a text element (grow).
    Click { target: SizeTarget },
    /// Secondary click on a text element (shrink).
    RightClick { target: SizeTarget },
    /// Set the banner container rectangle in client coordinates.
    Container(Rect),
    /// Write the banner HTML to the given file, or to the session's output
    /// file when none is given.
    Render(Option<PathBuf>),
    Status,
    Help,
    Quit,
}

/// Help text listing all session commands.
pub const SESSION_HELP: &str = "\
Commands:
  <text>                     add a custom text overlay
  /festival <name>           set the festival name
  /offers <text>             set offers (use \\n between lines)
  /accent <#rrggbb>          set the accent colour
  /shop <name>               set the shop name
  /address <text>            set the address
  /email <text>              set the email
  /website <text>            set the website
  /mobile <text>             set the mobile number
  /alt-mobile <text>         set the alternate mobile number
  /instagram <handle>        set the Instagram handle
  /facebook <handle>         set the Facebook handle
  /logo <path>               load a logo image
  /remove-bg                 remove the logo background
  /add <text>                add a custom text overlay
  /remove <id>               remove a custom text overlay
  /texts                     list custom text overlays
  /generate                  generate the banner image
  /video                     generate a video from the banner
  /wait                      wait for the video to finish
  /cancel                    cancel the running video
  /key                       select an API key
  /down footer|<id> <x> <y>  start dragging an overlay
  /move <x> <y>              drag to a point
  /up                        finish the drag
  /leave                     pointer left the banner
  /click greeting|festival|<id>   grow a text element
  /rclick greeting|festival|<id>  shrink a text element
  /container <left> <top> <width> <height>
  /render [path]             write the banner HTML
  /status                    show session state
  /help                      show this help
  /quit                      leave the session";

impl SessionCommand {
    /// Parse one input line.
    ///
    /// Returns `Ok(None)` for blank input and `Err` with a usage message for
    /// malformed commands.
    pub fn parse(input: &str) -> Result<Option<Self>, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if trimmed.starts_with('/') {
            return Self::parse_command(trimmed).map(Some);
        }

        Ok(Some(SessionCommand::AddText(trimmed.to_string())))
    }

    fn parse_command(input: &str) -> Result<Self, String> {
        let (name, rest) = match input.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match name.to_lowercase().as_str() {
            "/festival" => Self::Set(BannerField::FestivalName(rest.to_string())),
            "/offers" => Self::Set(BannerField::Offers(rest.replace("\\n", "\n"))),
            "/accent" => Self::Set(BannerField::AccentColor(required(rest, "/accent <#rrggbb>")?)),
            "/shop" => Self::Set(BannerField::ShopName(rest.to_string())),
            "/address" => Self::Set(BannerField::Address(rest.to_string())),
            "/email" => Self::Set(BannerField::Email(rest.to_string())),
            "/website" => Self::Set(BannerField::Website(rest.to_string())),
            "/mobile" => Self::Set(BannerField::MobileNumber(rest.to_string())),
            "/alt-mobile" => Self::Set(BannerField::AltMobileNumber(rest.to_string())),
            "/instagram" => Self::Set(BannerField::InstagramHandle(
                rest.trim_start_matches('@').to_string(),
            )),
            "/facebook" => Self::Set(BannerField::FacebookHandle(rest.to_string())),
            "/logo" => Self::Logo(PathBuf::from(required(rest, "/logo <path>")?)),
            "/remove-bg" => Self::RemoveBackground,
            "/add" => Self::AddText(required(rest, "/add <text>")?),
            "/remove" => Self::RemoveText(parse_id(args.first().copied(), "/remove <id>")?),
            "/texts" => Self::ListTexts,
            "/generate" => Self::Generate,
            "/video" => Self::Video,
            "/wait" => Self::Wait,
            "/cancel" => Self::Cancel,
            "/key" => Self::SelectKey,
            "/down" => {
                const USAGE: &str = "/down footer|<id> <x> <y>";
                if args.len() != 3 {
                    return Err(usage(USAGE));
                }
                let target = match args[0].to_lowercase().as_str() {
                    "footer" => DragTarget::Footer,
                    id => DragTarget::CustomText(parse_id(Some(id), USAGE)?),
                };
                Self::Down {
                    target,
                    at: parse_point(&args[1..], USAGE)?,
                }
            }
            "/move" => Self::Move {
                at: parse_point(&args, "/move <x> <y>")?,
            },
            "/up" => Self::Up,
            "/leave" => Self::Leave,
            "/click" => Self::Click {
                target: parse_size_target(&args, "/click greeting|festival|<id>")?,
            },
            "/rclick" => Self::RightClick {
                target: parse_size_target(&args, "/rclick greeting|festival|<id>")?,
            },
            "/container" => {
                const USAGE: &str = "/container <left> <top> <width> <height>";
                let values = parse_numbers(&args, 4, USAGE)?;
                if values[2] <= 0.0 || values[3] <= 0.0 {
                    return Err("Container width and height must be positive".to_string());
                }
                Self::Container(Rect::new(values[0], values[1], values[2], values[3]))
            }
            "/render" => Self::Render(if rest.is_empty() {
                None
            } else {
                Some(PathBuf::from(rest))
            }),
            "/status" => Self::Status,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            _ => return Err(format!("Unknown command: {} (try /help)", name)),
        };
        Ok(command)
    }
}

fn usage(text: &str) -> String {
    format!("Usage: {}", text)
}

fn required(rest: &str, usage_text: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(usage(usage_text))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_id(arg: Option<&str>, usage_text: &str) -> Result<u64, String> {
    arg.and_then(|s| s.parse().ok())
        .ok_or_else(|| usage(usage_text))
}

fn parse_numbers(args: &[&str], count: usize, usage_text: &str) -> Result<Vec<f64>, String> {
    if args.len() != count {
        return Err(usage(usage_text));
    }
    args.iter()
        .map(|s| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| usage(usage_text))
        })
        .collect()
}

fn parse_point(args: &[&str], usage_text: &str) -> Result<Point, String> {
    let values = parse_numbers(args, 2, usage_text)?;
    Ok(Point::new(values[0], values[1]))
}

fn parse_size_target(args: &[&str], usage_text: &str) -> Result<SizeTarget, String> {
    match args {
        [target] => match target.to_lowercase().as_str() {
            "greeting" | "happy" => Ok(SizeTarget::Greeting),
            "festival" | "title" => Ok(SizeTarget::FestivalTitle),
            id => Ok(SizeTarget::CustomText(parse_id(Some(id), usage_text)?)),
        },
        _ => Err(usage(usage_text)),
    }
}
