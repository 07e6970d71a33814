//! Editor operations exposed on the command line.
//!
//! DESIGN
//! ======
//! Each [`Op`] maps onto one engine operation (or, for `drag`, a short
//! pointer-event sequence) against the open [`Session`]. Results are
//! returned as JSON so one-shot invocations and the line-oriented session
//! mode print the same shapes. Engine alerts become [`CliError::Alert`].

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use editor::align::AlignTarget;
use editor::camera::Point;
use editor::doc::{ElementId, ElementPatch, FontWeight, Size, TextAlign};
use editor::engine::{Action, EngineCore, ThemeChoice};
use editor::input::{Button, EditOutcome, InputState, Modifiers, TextField};
use editor::theme::Theme;
use editor::upload::UploadTarget;
use serde_json::{Value, json};
use time::OffsetDateTime;
use tracing::debug;

use crate::error::CliError;
use crate::services::{export, upload};
use crate::state::Session;

/// One line of session-mode input.
#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub op: Op,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Op {
    /// Print the scene as JSON.
    Show,
    /// Print the form record as JSON.
    FormShow,
    /// Set one form field by its camelCase key.
    FormSet { key: String, value: String },
    /// Switch theme. With elements on the page, choose --reset or --keep.
    Theme {
        name: String,
        #[arg(long, conflicts_with = "keep")]
        reset: bool,
        #[arg(long)]
        keep: bool,
    },
    /// Add a text element at the page center.
    AddText {
        #[arg(long)]
        text: Option<String>,
    },
    /// Add an image element from a PNG or JPEG file.
    AddImage { path: PathBuf },
    /// Replace the bitmap of an image element.
    ReplaceImage { id: ElementId, path: PathBuf },
    /// Replace the page background image.
    Background { path: PathBuf },
    /// Set the background overlay color and opacity percent.
    Overlay {
        color: String,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        opacity: u8,
    },
    /// Move an element to a position. Coordinates below zero are clamped.
    Move {
        id: ElementId,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Drag an element by a pointer delta, snapping to the page center lines.
    Drag {
        id: ElementId,
        #[arg(allow_negative_numbers = true)]
        dx: f64,
        #[arg(allow_negative_numbers = true)]
        dy: f64,
    },
    /// Resize an image element. Sizes below 50x50 are clamped.
    Resize { id: ElementId, width: f64, height: f64 },
    /// Edit text content and style.
    Edit {
        id: ElementId,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        weight: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        opacity: Option<u8>,
        #[arg(long)]
        align: Option<String>,
    },
    /// Apply a raw JSON element patch.
    Patch {
        id: ElementId,
        #[arg(long)]
        data: String,
    },
    /// Align an element to a page edge or center line.
    Align {
        target: AlignArg,
        /// Element to align; defaults to the current selection.
        #[arg(long)]
        id: Option<ElementId>,
    },
    /// Select an element, or clear the selection when no id is given.
    Select { id: Option<ElementId> },
    /// Delete an element.
    Delete { id: ElementId },
    /// Discard the layout and reseed it from the form and current theme.
    Reset,
    /// Export the page as a PDF.
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignArg {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

impl From<AlignArg> for AlignTarget {
    fn from(arg: AlignArg) -> Self {
        match arg {
            AlignArg::Left => Self::Left,
            AlignArg::Center => Self::HorizontalCenter,
            AlignArg::Right => Self::Right,
            AlignArg::Top => Self::Top,
            AlignArg::Middle => Self::VerticalCenter,
            AlignArg::Bottom => Self::Bottom,
        }
    }
}

/// Run one operation and return its JSON result.
///
/// # Errors
///
/// Returns a [`CliError`] for unknown ids, wrong element kinds, engine
/// alerts, and IO or projection failures.
pub async fn apply(session: &mut Session, op: Op) -> Result<Value, CliError> {
    debug!(?op, "applying");
    match op {
        Op::Show => Ok(serde_json::to_value(&session.engine.scene)?),
        Op::FormShow => Ok(serde_json::to_value(&session.engine.form)?),
        Op::FormSet { key, value } => {
            if !session.engine.set_form_field(&key, value) {
                return Err(CliError::UnknownField(key));
            }
            session.save_form()?;
            Ok(serde_json::to_value(&session.engine.form)?)
        }
        Op::Theme { name, reset, keep } => change_theme(session, Theme::parse(&name), reset, keep),
        Op::AddText { text } => {
            let id = session.engine.add_text();
            if let Some(content) = text {
                session.engine.update_element(&id, ElementPatch { content: Some(content), ..Default::default() });
            }
            element_json(&session.engine, id)
        }
        Op::AddImage { path } => {
            let actions = upload_into(session, UploadTarget::NewImage, path).await?;
            let created = actions.iter().find_map(|a| match a {
                Action::ElementCreated(element) => Some(element.id()),
                _ => None,
            });
            match created {
                Some(id) => element_json(&session.engine, id),
                None => Err(CliError::InvalidCommand("no image was added".into())),
            }
        }
        Op::ReplaceImage { id, path } => {
            require_image(&session.engine, id)?;
            upload_into(session, UploadTarget::Element(id), path).await?;
            element_json(&session.engine, id)
        }
        Op::Background { path } => {
            upload_into(session, UploadTarget::Background, path).await?;
            Ok(background_json(&session.engine))
        }
        Op::Overlay { color, opacity } => {
            session.engine.set_background_overlay(color, opacity);
            Ok(background_json(&session.engine))
        }
        Op::Move { id, x, y } => {
            let Some(stored) = session.engine.update_element(&id, ElementPatch::position(Point::new(x, y))) else {
                return Err(CliError::UnknownElement(id));
            };
            Ok(serde_json::to_value(stored)?)
        }
        Op::Drag { id, dx, dy } => drag(&mut session.engine, id, dx, dy),
        Op::Resize { id, width, height } => {
            require_image(&session.engine, id)?;
            session.engine.update_element(&id, ElementPatch::size(Size::new(width, height)));
            element_json(&session.engine, id)
        }
        Op::Edit { id, text, size, weight, color, opacity, align } => {
            let fields = [
                text.map(TextField::Content),
                size.map(TextField::FontSize),
                weight.map(|w| TextField::FontWeight(FontWeight::parse(&w))),
                color.map(TextField::Color),
                opacity.map(TextField::Opacity),
                align.map(|a| TextField::Align(TextAlign::parse(&a))),
            ];
            edit_text(&mut session.engine, id, fields.into_iter().flatten())
        }
        Op::Patch { id, data } => {
            let patch: ElementPatch = serde_json::from_str(&data)?;
            if session.engine.update_element(&id, patch).is_none() {
                return Err(CliError::UnknownElement(id));
            }
            element_json(&session.engine, id)
        }
        Op::Align { target, id } => {
            if let Some(id) = id {
                require_element(&session.engine, id)?;
                session.engine.set_selection(Some(id));
            }
            let Some(id) = session.engine.selection() else {
                return Err(CliError::NothingSelected);
            };
            session.engine.align_selected(target.into());
            element_json(&session.engine, id)
        }
        Op::Select { id } => {
            if let Some(id) = id {
                require_element(&session.engine, id)?;
            }
            session.engine.set_selection(id);
            Ok(json!({ "selected": session.engine.selection() }))
        }
        Op::Delete { id } => {
            if !session.engine.delete_element(&id) {
                return Err(CliError::UnknownElement(id));
            }
            Ok(json!({ "deleted": id }))
        }
        Op::Reset => {
            let theme = session.engine.theme;
            session.engine.reset_to_theme_defaults(theme);
            Ok(serde_json::to_value(&session.engine.scene)?)
        }
        Op::Export { output } => {
            let today = OffsetDateTime::now_utc().date();
            let path = export::export_pdf(session, output, today).await?;
            Ok(json!({ "path": path }))
        }
    }
}

fn change_theme(session: &mut Session, theme: Theme, reset: bool, keep: bool) -> Result<Value, CliError> {
    let actions = session.engine.request_theme_change(theme);
    if actions.iter().any(|a| matches!(a, Action::ConfirmThemeReset { .. })) {
        let choice = match (reset, keep) {
            (true, _) => ThemeChoice::ResetLayout,
            (false, true) => ThemeChoice::KeepLayout,
            (false, false) => return Err(CliError::ThemeNeedsChoice),
        };
        session.engine.resolve_theme_change(choice);
    }
    session.save_theme()?;
    Ok(json!({
        "theme": session.engine.theme.id(),
        "name": session.engine.theme.display_name(),
        "elements": session.engine.scene.len(),
    }))
}

async fn upload_into(session: &mut Session, target: UploadTarget, path: PathBuf) -> Result<Vec<Action>, CliError> {
    let ticket = session.engine.begin_upload(target);
    let result = upload::read_image(&path).await;
    let actions = session.engine.complete_upload(ticket, result);
    check_alerts(&actions)?;
    Ok(actions)
}

/// Press on the element's drag area, move by the delta, release.
fn drag(engine: &mut EngineCore, id: ElementId, dx: f64, dy: f64) -> Result<Value, CliError> {
    let origin = engine.element(&id).map(editor::doc::Element::position).ok_or(CliError::UnknownElement(id))?;
    // Selected elements are hit-tested first, so the press cannot land on a neighbour.
    engine.set_selection(Some(id));

    let press = engine.viewport.page_to_screen(Point::new(origin.x + 1.0, origin.y + 1.0));
    engine.on_pointer_down(press, Button::Primary, Modifiers::default());
    if !matches!(engine.input, InputState::PendingDrag { id: target, .. } if target == id) {
        engine.on_pointer_up(press, Button::Primary, Modifiers::default());
        return Err(CliError::InvalidCommand(format!("element {id} has no drag area at its origin")));
    }

    let release = Point::new(press.x + dx, press.y + dy);
    engine.on_pointer_move(release, Modifiers::default());
    let guides = engine.ui.guides;
    engine.on_pointer_up(release, Button::Primary, Modifiers::default());

    let mut out = element_json(engine, id)?;
    out["snapped"] = json!({ "vertical": guides.vertical, "horizontal": guides.horizontal });
    Ok(out)
}

fn edit_text(engine: &mut EngineCore, id: ElementId, fields: impl Iterator<Item = TextField>) -> Result<Value, CliError> {
    let element = engine.element(&id).ok_or(CliError::UnknownElement(id))?;
    if !element.is_text() {
        return Err(CliError::NotText(id));
    }
    engine.begin_text_edit(&id);
    for field in fields {
        engine.edit_text(field);
    }
    engine.finish_text_edit(EditOutcome::Save);
    element_json(engine, id)
}

fn check_alerts(actions: &[Action]) -> Result<(), CliError> {
    match actions.iter().find_map(|a| match a {
        Action::Alert(message) => Some(message.clone()),
        _ => None,
    }) {
        Some(message) => Err(CliError::Alert(message)),
        None => Ok(()),
    }
}

fn require_element(engine: &EngineCore, id: ElementId) -> Result<(), CliError> {
    engine.element(&id).map(|_| ()).ok_or(CliError::UnknownElement(id))
}

fn require_image(engine: &EngineCore, id: ElementId) -> Result<(), CliError> {
    let element = engine.element(&id).ok_or(CliError::UnknownElement(id))?;
    if element.is_image() { Ok(()) } else { Err(CliError::NotImage(id)) }
}

fn element_json(engine: &EngineCore, id: ElementId) -> Result<Value, CliError> {
    let element = engine.element(&id).ok_or(CliError::UnknownElement(id))?;
    Ok(serde_json::to_value(element)?)
}

fn background_json(engine: &EngineCore) -> Value {
    let scene = &engine.scene;
    json!({
        "backgroundImage": scene.background_image,
        "backgroundOverlay": scene.background_overlay,
        "backgroundOverlayOpacity": scene.background_overlay_opacity,
    })
}

/// Split a session line into words. Double quotes group words and a
/// backslash escapes the next character.
///
/// # Errors
///
/// Returns [`CliError::InvalidCommand`] for an unterminated quote.
pub fn tokenize(line: &str) -> Result<Vec<String>, CliError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quoted {
        return Err(CliError::InvalidCommand("unterminated quote".into()));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
