use crate::info::{AccessMethod, MaterialInfo};
use crate::report::MaterialReport;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn format_materials_table(materials: &[MaterialInfo]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Index").add_attribute(Attribute::Bold),
        Cell::new("RGBA").add_attribute(Attribute::Bold),
        Cell::new("Hex").add_attribute(Attribute::Bold),
        Cell::new("Faces").add_attribute(Attribute::Bold),
        Cell::new("Stroke").add_attribute(Attribute::Bold),
        Cell::new("Valid").add_attribute(Attribute::Bold),
        Cell::new("Access Method").add_attribute(Attribute::Bold),
    ]);

    for (column, alignment) in [(0, CellAlignment::Right), (2, CellAlignment::Center), (5, CellAlignment::Center)] {
        if let Some(col) = table.column_mut(column) {
            col.set_cell_alignment(alignment);
        }
    }

    for info in materials {
        let valid = if info.is_valid {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(info.material_index),
            Cell::new(format!("{},{},{},{}", info.r, info.g, info.b, info.a)),
            Cell::new(info.hex_color()),
            Cell::new(&info.rendered_faces),
            Cell::new(&info.stroke),
            valid,
            Cell::new(info.access_method.to_string()).fg(access_color(&info.access_method)),
        ]);
    }

    table.to_string()
}

fn access_color(method: &AccessMethod) -> Color {
    match method {
        AccessMethod::Standard => Color::Reset,
        AccessMethod::ReferenceComparison(_) => Color::Magenta,
        AccessMethod::StandardFailed(_) => Color::Red,
        AccessMethod::Default => Color::Yellow,
    }
}

pub fn format_summary(report: &MaterialReport) -> String {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Material Summary").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![format!("Total Materials: {}", report.total)]);
    table.add_row(vec![format!("Valid: {}", report.valid)]);
    table.add_row(vec![
        Cell::new(format!("Invalid: {}", report.invalid)).fg(if report.invalid > 0 {
            Color::Yellow
        } else {
            Color::Reset
        }),
    ]);
    table.to_string()
}
