//! Per-template dimensional overrides.
//!
//! The rasterizer does not paginate, so oversized content is silently
//! clipped. A few catalog entries are known to clip or lose their footer at
//! the default dimensions and get tightened values here. Both the print flow
//! and the PDF flow consult this table, and only this table, so the two
//! outputs stay visually consistent. The numbers are hand-tuned against
//! observed clipping, not derived from template geometry; audit any new
//! template against them before adding it to the catalog.

/// Font scaling applied inside the print document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontScale {
    Regular,
    Compact,
}

impl FontScale {
    /// Base em factor for the template body.
    pub fn em(self) -> f64 {
        match self {
            FontScale::Regular => 0.92,
            FontScale::Compact => 0.88,
        }
    }

    /// Marker class injected on the print clone.
    pub fn class(self) -> &'static str {
        match self {
            FontScale::Regular => "scale-regular",
            FontScale::Compact => "scale-compact",
        }
    }
}

/// Dimensional correction record for one template.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionalOverride {
    /// Staged container width in px.
    pub container_width: u32,
    /// Staged container height in px.
    pub container_height: u32,
    /// Container padding in px.
    pub container_padding: u32,
    /// `@page` margin shorthand for the print document.
    pub page_margins: &'static str,
    /// Target height of the printed template.
    pub print_height: &'static str,
    pub font_scale: FontScale,
}

impl Default for DimensionalOverride {
    fn default() -> Self {
        Self {
            container_width: 750,
            container_height: 970,
            container_padding: 40,
            page_margins: "0.4in 0.5in 0.3in 0.5in",
            print_height: "10.3in",
            font_scale: FontScale::Regular,
        }
    }
}

/// Look up the override for a template. Total: unknown ids get the default.
pub fn override_for(template_id: i32) -> DimensionalOverride {
    match template_id {
        // Missing footer at default height.
        2 => DimensionalOverride {
            container_height: 940,
            container_padding: 32,
            page_margins: "0.35in 0.5in 0.25in 0.5in",
            print_height: "10.4in",
            font_scale: FontScale::Compact,
            ..Default::default()
        },
        // Right-side cutoff and footer issues.
        6 => DimensionalOverride {
            container_width: 700,
            container_height: 940,
            container_padding: 28,
            page_margins: "0.35in 0.6in 0.25in 0.6in",
            print_height: "10.4in",
            font_scale: FontScale::Compact,
        },
        // Footer text cutoff.
        13 => DimensionalOverride {
            container_height: 950,
            container_padding: 36,
            page_margins: "0.35in 0.5in 0.25in 0.5in",
            print_height: "10.4in",
            font_scale: FontScale::Compact,
            ..Default::default()
        },
        _ => DimensionalOverride::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TEMPLATE_COUNT;

    #[test]
    fn table_is_total_over_the_catalog() {
        for id in 1..=TEMPLATE_COUNT as i32 {
            let ov = override_for(id);
            assert!(ov.container_width > 0);
            assert!(ov.container_height > 0);
            assert!(!ov.page_margins.is_empty());
        }
        // Out-of-catalog ids still resolve to the default, never a gap.
        assert_eq!(override_for(99), DimensionalOverride::default());
        assert_eq!(override_for(-1), DimensionalOverride::default());
    }

    #[test]
    fn problem_templates_are_tightened() {
        for id in [2, 6, 13] {
            let ov = override_for(id);
            assert!(ov.container_height < 970);
            assert_eq!(ov.font_scale, FontScale::Compact);
            assert_eq!(ov.print_height, "10.4in");
        }
        assert_eq!(override_for(6).container_width, 700);
    }
}
