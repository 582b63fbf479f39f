use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::view::COLUMNS;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Paginated vehicle table
// ---------------------------------------------------------------------------

pub fn vehicle_table(ui: &mut Ui, state: &mut AppState) {
    let page = state.current_page();
    let (current, page_count, total) = (page.page, page.page_count, page.total);

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(Layout::left_to_right(Align::Center));
    for col in COLUMNS {
        table = table.column(Column::initial(col.width).at_least(40.0).clip(true));
    }

    table
        .header(ROW_HEIGHT, |mut header| {
            for col in COLUMNS {
                header.col(|ui| {
                    ui.strong(col.header);
                });
            }
        })
        .body(|mut body| {
            for row in page.rows {
                body.row(ROW_HEIGHT, |mut tr| {
                    for col in COLUMNS {
                        tr.col(|ui| {
                            ui.label(row.cell(col.field));
                        });
                    }
                });
            }
        });

    ui.add_space(6.0);
    let mut target = current;
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(current > 0, egui::Button::new("◀ Prev"))
            .clicked()
        {
            target = current - 1;
        }
        ui.label(format!("Page {} of {page_count}  ({total} vehicles)", current + 1));
        if ui
            .add_enabled(current + 1 < page_count, egui::Button::new("Next ▶"))
            .clicked()
        {
            target = current + 1;
        }
    });

    if target != current {
        state.set_page(target);
    }
}
