//! Server-side SVG rendering of the canvas.
//!
//! Rendering is a pure function of [`CanvasState`]: the same state always yields
//! byte-identical output. Avatars are referenced by URL, never fetched or inlined.
//! Markup is built with `maud`, which escapes every interpolated value. Elements
//! are always written with a body so the output stays well-formed XML.

use maud::{Markup, html};

use super::canvas::{CanvasState, Placement};

/// Size of one grid cell in pixels
pub const CELL_PX: u32 = 24;

const BACKGROUND: &str = "#0b1020";
const EMPTY_CELL_FILL: &str = "#0f172a";
const GRID_STROKE: &str = "#1e2a4a";

/// Pixel offset of a cell coordinate. Computed in `u64` so no grid size overflows.
fn px(cell: u32) -> u64 {
    u64::from(cell) * u64::from(CELL_PX)
}

/// Render the canvas as an SVG document
pub fn render_svg(state: &CanvasState) -> String {
    let width_px = px(state.width);
    let height_px = px(state.height);
    let empty_cells = (0..state.height)
        .flat_map(|y| (0..state.width).map(move |x| (x, y)))
        .filter(|&(x, y)| !state.is_occupied(x, y));

    html! {
        svg xmlns="http://www.w3.org/2000/svg" width=(width_px) height=(height_px)
            viewBox={ "0 0 " (width_px) " " (height_px) } {
            rect width=(width_px) height=(height_px) fill=(BACKGROUND) {}
            @for (x, y) in empty_cells {
                rect x=(px(x)) y=(px(y)) width=(CELL_PX) height=(CELL_PX)
                    fill=(EMPTY_CELL_FILL) stroke=(GRID_STROKE) stroke-width="1" {}
            }
            @for placement in &state.placements {
                (render_placement(placement))
            }
        }
    }
    .into_string()
}

fn render_placement(placement: &Placement) -> Markup {
    let x = px(placement.x);
    let y = px(placement.y);
    let half = u64::from(CELL_PX / 2);
    let avatar = placement
        .avatar_ref
        .as_deref()
        .filter(|r| !r.trim().is_empty());

    html! {
        g {
            title { (tooltip(placement)) }
            @if let Some(avatar) = avatar {
                image href=(avatar) x=(x) y=(y) width=(CELL_PX) height=(CELL_PX)
                    preserveAspectRatio="xMidYMid slice" {}
            } @else {
                rect x=(x) y=(y) width=(CELL_PX) height=(CELL_PX)
                    fill={ "hsl(" (identity_hue(placement.owner_id.as_str())) ", 60%, 45%)" } {}
                text x=(x + half) y=(y + half + 4) font-family="monospace" font-size="10"
                    font-weight="bold" text-anchor="middle" fill="#ffffff" {
                    (initials(&placement.display_name, placement.owner_id.as_str()))
                }
            }
            rect x=(x) y=(y) width=(CELL_PX) height=(CELL_PX) fill="none"
                stroke=(GRID_STROKE) stroke-width="1" {}
        }
    }
}

fn tooltip(placement: &Placement) -> String {
    if placement.message.is_empty() {
        placement.display_name.clone()
    } else {
        format!("{}: {}", placement.display_name, placement.message)
    }
}

/// Two-letter initials: first letters of the first two words, or the first two
/// letters of a single word. Falls back to the identity, then to `??`.
pub fn initials(display_name: &str, identity: &str) -> String {
    let source = if display_name.trim().is_empty() {
        identity
    } else {
        display_name
    };

    let words: Vec<&str> = source
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-' || c == '.')
        .filter(|w| !w.is_empty())
        .collect();

    let letters: String = match words.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(2).collect(),
        [first, second, ..] => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect(),
    };

    if letters.is_empty() {
        "??".to_string()
    } else {
        letters.to_uppercase()
    }
}

/// Hue in `0..360` derived from a 32-bit FNV-1a hash of the identity
pub fn identity_hue(identity: &str) -> u32 {
    const FNV_OFFSET: u32 = 0x811c_9dc5;
    const FNV_PRIME: u32 = 0x0100_0193;

    let hash = identity.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    });
    hash % 360
}
