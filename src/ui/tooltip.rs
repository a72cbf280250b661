use eframe::egui::{self, Context, Pos2, RichText, Ui};

use crate::chart::format::money;
use crate::data::model::HospitalAggregate;

/// Distance from the pointer to the tooltip's top-left corner.
pub const POINTER_OFFSET: f32 = 12.0;

// ---------------------------------------------------------------------------
// Tooltip state
// ---------------------------------------------------------------------------

/// Text shown for one hovered hospital.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub hospital: String,
    pub location: String,
    pub lines: Vec<String>,
}

impl TooltipContent {
    pub fn for_aggregate(agg: &HospitalAggregate) -> Self {
        Self {
            hospital: agg.hospital.clone(),
            location: agg.location(),
            lines: vec![
                format!("Median min {}", money(agg.med_min)),
                format!("Median max {}", money(agg.med_max)),
            ],
        }
    }
}

/// A single long-lived tooltip. Hovering moves and fills it; leaving only
/// hides it.
#[derive(Debug, Clone, Default)]
pub struct TooltipState {
    pub visible: bool,
    pub pos: Pos2,
    pub content: Option<TooltipContent>,
}

impl TooltipState {
    pub fn show(&mut self, pointer: Pos2, agg: &HospitalAggregate) {
        self.pos = pointer + egui::vec2(POINTER_OFFSET, POINTER_OFFSET);
        // content follows the mark, not just the hospital name
        self.content = Some(TooltipContent::for_aggregate(agg));
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Hospital currently under the pointer, if the tooltip is showing.
    pub fn hovered(&self) -> Option<&str> {
        if self.visible {
            self.content.as_ref().map(|c| c.hospital.as_str())
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

pub fn show_tooltip(ctx: &Context, tooltip: &TooltipState) {
    if !tooltip.visible {
        return;
    }
    let Some(content) = &tooltip.content else {
        return;
    };

    egui::Area::new(egui::Id::new("price_tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(tooltip.pos)
        .interactable(false)
        .show(ctx, |ui: &mut Ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui: &mut Ui| {
                ui.label(RichText::new(&content.hospital).strong());
                ui.label(&content.location);
                for line in &content.lines {
                    ui.label(line);
                }
            });
        });
}
