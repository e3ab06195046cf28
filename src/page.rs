//! Paper formats and page orientation.
//!
//! [`PageSetup`](markflow_render_core::PageSetup) stores raw point
//! dimensions; the types here translate the customary paper names into
//! those dimensions. Orientation is not a stored flag, it is the
//! relation between width and height, so switching it swaps the two.

use markflow_render_core::PageSetup;

fn mm(value: f32) -> f32 {
    value / 25.4 * 72.0
}

/// Standard paper formats selectable per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    B0,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    Letter,
    Legal,
    Ledger,
    Tabloid,
    /// 11 by 17 inches.
    Eleven17,
}

impl PaperSize {
    /// Portrait width and height in millimeters.
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A0 => (841.0, 1189.0),
            PaperSize::A1 => (594.0, 841.0),
            PaperSize::A2 => (420.0, 594.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::A6 => (105.0, 148.0),
            PaperSize::B0 => (1000.0, 1414.0),
            PaperSize::B1 => (707.0, 1000.0),
            PaperSize::B2 => (500.0, 707.0),
            PaperSize::B3 => (353.0, 500.0),
            PaperSize::B4 => (250.0, 353.0),
            PaperSize::B5 => (176.0, 250.0),
            PaperSize::B6 => (125.0, 176.0),
            PaperSize::Letter => (216.0, 279.0),
            PaperSize::Legal => (216.0, 356.0),
            PaperSize::Ledger => (279.0, 432.0),
            PaperSize::Tabloid => (279.0, 432.0),
            PaperSize::Eleven17 => (11.0 * 25.4, 17.0 * 25.4),
        }
    }

    /// Writes the format into `setup`, keeping its current orientation.
    pub(crate) fn apply_to(self, setup: &mut PageSetup) {
        let (width, height) = self.dimensions_mm();
        let landscape = setup.page_width > setup.page_height;
        if landscape {
            setup.page_width = mm(height);
            setup.page_height = mm(width);
        } else {
            setup.page_width = mm(width);
            setup.page_height = mm(height);
        }
    }
}

/// Which way the paper turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PaperOrientation {
    #[default]
    Portrait,
    Landscape,
}

impl PaperOrientation {
    /// Swaps the page dimensions of `setup` when they disagree with the
    /// requested orientation.
    pub(crate) fn apply_to(self, setup: &mut PageSetup) {
        let wants_landscape = self == PaperOrientation::Landscape;
        let is_landscape = setup.page_width > setup.page_height;
        if wants_landscape != is_landscape {
            std::mem::swap(&mut setup.page_width, &mut setup.page_height);
        }
    }
}
