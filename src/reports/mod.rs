use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use fingerforge::api::AuditResult;
use fingerforge::notes::NoteEvent;
use fingerforge::optimizer::runner::FingeringReport;
use fingerforge::sizes::HandSize;

fn measure_cell(note: &NoteEvent) -> Cell {
    match note.measure {
        Some(m) => Cell::new(m),
        None => Cell::new("-"),
    }
}

pub fn print_fingering_table(events: &[NoteEvent], report: &FingeringReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Meas"),
        Cell::new("Note"),
        Cell::new("x (cm)"),
        Cell::new("Finger").fg(Color::Cyan),
        Cell::new("v"),
        Cell::new("Window"),
        Cell::new("d"),
    ]);

    for step in &report.steps {
        let note = &events[step.index];
        let finger = if step.repaired {
            Cell::new(format!("{}*", step.finger)).fg(Color::Yellow)
        } else {
            Cell::new(step.finger).fg(Color::Cyan)
        };
        let cost = match step.cost {
            Some(c) => Cell::new(format!("{:.1}", c)),
            None => Cell::new("infeasible").fg(Color::Red),
        };
        let window: Vec<String> = step.window.iter().map(|f| f.to_string()).collect();

        table.add_row(vec![
            Cell::new(step.index),
            measure_cell(note),
            Cell::new(note.label()),
            Cell::new(format!("{:.2}", note.x)).set_alignment(CellAlignment::Right),
            finger,
            cost.set_alignment(CellAlignment::Right),
            Cell::new(window.join(" ")),
            Cell::new(step.depth),
        ]);
    }
    println!("{}", table);

    println!(
        "Notes: {} | Mean v: {:.2} | Infeasible windows: {} | Filled: {}",
        report.steps.len(),
        report.mean_cost(),
        report.infeasible_windows(),
        report.repaired.len()
    );
}

pub fn print_audit_report(events: &[NoteEvent], audit: &AuditResult) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("From").add_attribute(Attribute::Bold),
        Cell::new("To"),
        Cell::new("Finger"),
        Cell::new("Travel"),
        Cell::new("dt"),
        Cell::new("v"),
        Cell::new("Rule").fg(Color::Red),
    ]);

    for t in &audit.score.transitions {
        let rule = match t.violation {
            Some(v) => Cell::new(v).fg(Color::Red),
            None => Cell::new(""),
        };
        table.add_row(vec![
            Cell::new(format!("{} {}", t.from_index, events[t.from_index].label())),
            Cell::new(format!("{} {}", t.to_index, events[t.to_index].label())),
            Cell::new(t.finger),
            Cell::new(format!("{:.2}", t.displacement)),
            Cell::new(format!("{:.2}", t.elapsed)),
            Cell::new(format!("{:.2}", t.velocity)),
            rule,
        ]);
    }
    println!("{}", table);

    let s = &audit.score;
    println!(
        "Mean v: {:.2} | Max v: {:.2} | Travel: {:.1} cm | Black: {} | Thumb-under: {} | Violations: {}",
        s.mean_velocity,
        s.max_velocity,
        s.total_displacement,
        s.stat_black,
        s.stat_thumb_under,
        s.stat_violations
    );
}

pub fn print_size_table(sizes: &[(HandSize, f32)]) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["Size", "Factor", "Span (cm)"]);
    for (size, factor) in sizes {
        table.add_row(vec![
            Cell::new(size),
            Cell::new(format!("{:.2}", factor)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", size.span_cm())).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}
