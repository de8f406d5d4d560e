// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Line-command console driving an `AdminPanel` over a `HeadlessMap`.
//!
//! Each line is one command. Entries are addressed by their 1-based
//! position in `list` output; form edits and drawing commands act on the
//! selected entity. The outbox is flushed after every command.

use crate::components::{SidebarAction, SidebarEntry, SidebarView};
use crate::editing::GeometryEntity;
use crate::editing::Mode;
use crate::map::{HeadlessMap, MapEvent, MapSurface};
use crate::model::{EntityId, GeometryKind, LatLng, OverlayId};
use crate::panel::AdminPanel;
use crate::persistence::Transport;
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

const HELP: &str = "\
commands:
  mode <view|point|line|poly>     switch drawing mode
  modes                           show the toolbar
  click <lat> <lng>               click on the empty map
  select <n>                      click entry n
  modify <n>                      edit entry n
  name <text> | desc <text>       edit the open form
  save | delete | cancel          form buttons
  drag <n> <vertex> <lat> <lng>   drag a marker of entry n
  append <lat> <lng>              add a vertex to the shape being drawn
  end                             finish the shape being drawn
  zoom <level>                    zoom the map
  import <lat> <lng> <name>       copy a place onto the map
  load | list | status | help | quit";

// ============================================================================
// COMMANDS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Mode(Mode),
    Modes,
    Click(LatLng),
    Select(usize),
    Modify(usize),
    Name(String),
    Describe(String),
    Save,
    Delete,
    Cancel,
    Drag {
        entry: usize,
        vertex: usize,
        to: LatLng,
    },
    Append(LatLng),
    End,
    Zoom(u8),
    Import {
        at: LatLng,
        name: String,
    },
    Load,
    List,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a number: '{0}'")]
    Number(String),

    #[error("unknown mode '{0}'")]
    Mode(String),

    #[error("no entry {0}")]
    NoEntry(usize),

    #[error("nothing is selected")]
    NoSelection,

    #[error("entry {entry} has no draggable vertex {vertex}")]
    NotDraggable { entry: usize, vertex: usize },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        let command = match word {
            "mode" => {
                let name = args.next().ok_or(CommandError::Usage("mode <view|point|line|poly>"))?;
                Command::Mode(Mode::from_name(name).ok_or_else(|| CommandError::Mode(name.to_string()))?)
            }
            "modes" => Command::Modes,
            "click" => Command::Click(lat_lng(&mut args, "click <lat> <lng>")?),
            "select" => Command::Select(number(args.next(), "select <n>")?),
            "modify" => Command::Modify(number(args.next(), "modify <n>")?),
            "name" => Command::Name(rest.to_string()),
            "desc" => Command::Describe(rest.to_string()),
            "save" => Command::Save,
            "delete" => Command::Delete,
            "cancel" => Command::Cancel,
            "drag" => {
                const USAGE: &str = "drag <n> <vertex> <lat> <lng>";
                Command::Drag {
                    entry: number(args.next(), USAGE)?,
                    vertex: number(args.next(), USAGE)?,
                    to: lat_lng(&mut args, USAGE)?,
                }
            }
            "append" => Command::Append(lat_lng(&mut args, "append <lat> <lng>")?),
            "end" => Command::End,
            "zoom" => Command::Zoom(number(args.next(), "zoom <level>")?),
            "import" => {
                const USAGE: &str = "import <lat> <lng> <name>";
                let at = lat_lng(&mut args, USAGE)?;
                let name = args.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Err(CommandError::Usage(USAGE));
                }
                Command::Import { at, name }
            }
            "load" => Command::Load,
            "list" | "ls" => Command::List,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn number<T: FromStr>(word: Option<&str>, usage: &'static str) -> Result<T, CommandError> {
    let word = word.ok_or(CommandError::Usage(usage))?;
    word.parse()
        .map_err(|_| CommandError::Number(word.to_string()))
}

fn lat_lng<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    usage: &'static str,
) -> Result<LatLng, CommandError> {
    let lat = number(args.next(), usage)?;
    let lng = number(args.next(), usage)?;
    Ok(LatLng::new(lat, lng))
}

// ============================================================================
// EXECUTION
// ============================================================================

/// Apply one command; returns text to print, if any
pub fn execute(
    panel: &mut AdminPanel<HeadlessMap>,
    command: Command,
) -> Result<Option<String>, CommandError> {
    match command {
        Command::Mode(mode) => {
            panel.set_mode(mode);
            return Ok(Some(panel.status().text().to_string()));
        }
        Command::Modes => return Ok(Some(render_modes(panel))),
        Command::Click(at) => panel.handle_map_event(MapEvent::Click { overlay: None, at }),
        Command::Select(entry) => {
            let id = entry_id(panel, entry)?;
            panel.handle_sidebar_action(id, SidebarAction::Click);
        }
        Command::Modify(entry) => {
            let id = entry_id(panel, entry)?;
            panel.handle_sidebar_action(id, SidebarAction::Modify);
        }
        Command::Name(name) => form_action(panel, SidebarAction::EditName(name))?,
        Command::Describe(text) => form_action(panel, SidebarAction::EditDescription(text))?,
        Command::Save => form_action(panel, SidebarAction::Save)?,
        Command::Delete => form_action(panel, SidebarAction::Delete)?,
        Command::Cancel => form_action(panel, SidebarAction::Cancel)?,
        Command::Drag { entry, vertex, to } => {
            let id = entry_id(panel, entry)?;
            let marker = vertex_marker(panel, id, vertex)
                .filter(|&marker| panel.map_mut().drag_marker(marker, to))
                .ok_or(CommandError::NotDraggable { entry, vertex })?;
            panel.handle_map_event(MapEvent::DragEnd { overlay: marker });
        }
        Command::Append(at) => {
            let overlay = selected_overlay(panel)?;
            panel.handle_map_event(MapEvent::VertexAppended { overlay, at });
        }
        Command::End => {
            let overlay = selected_overlay(panel)?;
            panel.handle_map_event(MapEvent::EndLine { overlay });
        }
        Command::Zoom(level) => {
            panel.map_mut().set_zoom(level);
            panel.handle_map_event(MapEvent::ZoomEnd);
        }
        Command::Import { at, name } => {
            panel.import_place(name, "", at);
        }
        Command::Load => panel.load(),
        Command::List => return Ok(Some(render_list(panel))),
        Command::Status => return Ok(Some(render_status(panel))),
        Command::Help => return Ok(Some(HELP.to_string())),
        Command::Quit => {}
    }
    Ok(None)
}

fn entry_id(panel: &AdminPanel<HeadlessMap>, entry: usize) -> Result<EntityId, CommandError> {
    entry
        .checked_sub(1)
        .and_then(|index| panel.sidebar().iter().nth(index))
        .map(SidebarEntry::entity)
        .ok_or(CommandError::NoEntry(entry))
}

fn form_action(
    panel: &mut AdminPanel<HeadlessMap>,
    action: SidebarAction,
) -> Result<(), CommandError> {
    let id = panel.selected().ok_or(CommandError::NoSelection)?;
    panel.handle_sidebar_action(id, action);
    Ok(())
}

fn selected_overlay(panel: &AdminPanel<HeadlessMap>) -> Result<OverlayId, CommandError> {
    panel
        .selected()
        .and_then(|id| panel.entity(id))
        .map(|entity| entity.primary_overlay())
        .ok_or(CommandError::NoSelection)
}

/// Marker handle of `vertex`; a point's only vertex is its marker
fn vertex_marker(panel: &AdminPanel<HeadlessMap>, id: EntityId, vertex: usize) -> Option<OverlayId> {
    let entity = panel.entity(id)?;
    match entity.kind() {
        GeometryKind::Point => (vertex == 0).then(|| entity.primary_overlay()),
        GeometryKind::Line | GeometryKind::Polygon => entity.vertex_markers().get(vertex).copied(),
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn render_modes(panel: &AdminPanel<HeadlessMap>) -> String {
    panel
        .toolbar()
        .buttons()
        .iter()
        .map(|button| {
            let cursor = if button.active { '*' } else { ' ' };
            format!("{cursor} {:<5} {}", button.mode.name(), button.tooltip())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_list(panel: &AdminPanel<HeadlessMap>) -> String {
    if panel.sidebar().is_empty() {
        return "(no geometries)".to_string();
    }
    panel
        .sidebar()
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let entity = panel.entity(entry.entity())?;
            Some(render_entry(panel, index + 1, entry, entity))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One list line: position, kind, content, then state, lifecycle and tint
fn render_entry(
    panel: &AdminPanel<HeadlessMap>,
    position: usize,
    entry: &SidebarEntry,
    entity: &GeometryEntity,
) -> String {
    let cursor = if panel.selected() == Some(entity.id) { '*' } else { ' ' };
    let body = match entry.view() {
        SidebarView::Summary(summary) => format!(
            "{} - {} ({}){}",
            summary.name,
            summary.description,
            summary.created,
            if summary.can_modify { " [modify]" } else { "" }
        ),
        SidebarView::Form(form) => {
            format!("editing name=\"{}\" desc=\"{}\"", form.name, form.description)
        }
    };
    let tint = entry.tint().color().to_rgba8();
    format!(
        "{cursor}{position:>3}. {:<5} {body} <{:?}, {}, #{:02x}{:02x}{:02x}>",
        entity.kind().wire_name(),
        entry.state(),
        entity.lifecycle().name(),
        tint.r,
        tint.g,
        tint.b,
    )
}

fn render_status(panel: &AdminPanel<HeadlessMap>) -> String {
    let map = panel.map();
    let center = map.center();
    let mut fields = vec![
        format!("mode {}", panel.mode().name()),
        format!("user {}", panel.current_user()),
        format!("center {:.5},{:.5} zoom {}", center.lat, center.lng, map.zoom()),
    ];
    if let Some(synced) = panel.status().last_synced() {
        fields.push(format!("loaded at {synced}"));
    }
    format!(
        "{}\n{}\nbackend {}",
        panel.status(),
        fields.join(" | "),
        panel.persistence().base_url()
    )
}

// ============================================================================
// SESSION
// ============================================================================

/// Read commands from `input` until it ends or `quit`
pub fn run_session(
    panel: &mut AdminPanel<HeadlessMap>,
    transport: &mut impl Transport,
    input: impl BufRead,
    mut output: impl Write,
) -> std::io::Result<()> {
    writeln!(output, "{}", panel.status())?;
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => match execute(panel, command) {
                Ok(Some(text)) => writeln!(output, "{text}")?,
                Ok(None) => {}
                Err(e) => writeln!(output, "error: {e}")?,
            },
            Err(e) => writeln!(output, "error: {e}")?,
        }

        if panel.persistence().has_pending() {
            panel.flush(transport);
            if let Some(error) = panel.status().error() {
                writeln!(output, "error: {error}")?;
            }
        }
    }
    Ok(())
}
