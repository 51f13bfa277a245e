//! End-to-end template scenarios: persisted JSON in, edits, wire form out,
//! preview layout.

use pretty_assertions::assert_eq;
use serde_json::json;

use ticketera::preview::{ImageSource, OfflineLoader, PreviewNode, PreviewRenderer};
use ticketera::ticket::{
    Align, BlockKind, BuilderBlock, ContentBlock, Dialect, Direction, TemplateEvent,
    TicketTemplate, normalize,
};

fn parse(value: serde_json::Value) -> Vec<ContentBlock> {
    serde_json::from_value(value).unwrap()
}

fn offline_renderer(width_mm: f64) -> PreviewRenderer {
    PreviewRenderer::with_loader(width_mm, Box::new(OfflineLoader))
}

#[test]
fn partial_persisted_value_normalizes_and_previews() {
    // A sloppy persisted value: bare text, a table with a short row and no
    // widths, a QR block.
    let wire = parse(json!([
        {"text": "Hi"},
        {"header": [{"text": "A"}, {"text": "B"}], "rows": [[{"text": "1"}]]},
        {"qrContent": "https://example.com"}
    ]));

    let template = TicketTemplate::from_value(Some(&wire), Dialect::Full);
    let content = template.content();

    // The repaired table geometry survives to the wire form.
    assert_eq!(
        serde_json::to_value(&content[1]).unwrap(),
        json!({
            "header": [
                {"text": "A", "align": "left"},
                {"text": "B", "align": "left"}
            ],
            "headerBold": false,
            "columnWidths": [50, 50],
            "lineChar": "-",
            "rowSpacing": 1,
            "footerLine": false,
            "rows": [[
                {"text": "1", "align": "left"},
                {"text": "", "align": "left"}
            ]]
        })
    );

    let mut renderer = offline_renderer(80.0);
    let preview = renderer.render(&content);
    assert_eq!(preview.nodes.len(), 3);
    match &preview.nodes[1] {
        PreviewNode::Table(table) => {
            assert_eq!(table.rows[0].len(), 2);
            assert_eq!(table.header[0].width_pct, Some(50));
        }
        other => panic!("expected table node, got {other:?}"),
    }
    assert_eq!(preview.nodes[2], PreviewNode::QrPlaceholder);
}

#[test]
fn edit_session_flow_emits_wire_payloads() {
    let mut template = TicketTemplate::new(Dialect::Full);

    let event = template.add_block(BlockKind::Table);
    assert!(matches!(event, TemplateEvent::ContentChange(_)));

    template.add_row(1).unwrap();
    template.update_cell(1, 0, 0, "Pan").unwrap();
    template.update_cell(1, 0, 1, "2").unwrap();
    template.update_cell_align(1, 0, 2, Align::Right).unwrap();
    template.update_column_width(1, 0, "50").unwrap();
    template.move_block(1, Direction::Up).unwrap();

    let submit = template.submit();
    let payload = match submit {
        TemplateEvent::ContentSubmit(content) => content,
        other => panic!("expected submit event, got {other:?}"),
    };

    // Table first after the move, default text block second.
    let table = match &payload[0] {
        ContentBlock::Table(table) => table,
        other => panic!("expected table, got {other:?}"),
    };
    assert_eq!(table.column_widths, Some(vec![50, 20, 20]));
    assert_eq!(table.rows[0][0].text, "Pan");
    assert_eq!(table.rows[0][2].align, Some(Align::Right));
    assert!(matches!(&payload[1], ContentBlock::Text(t) if t.text.is_empty()));

    // The submitted wire form re-normalizes to the live state.
    assert_eq!(
        normalize(Some(&payload), Dialect::Full),
        template.blocks().to_vec()
    );
}

#[test]
fn normalization_is_idempotent_over_the_wire_transform() {
    let dialect = Dialect::Full;
    let messy = parse(json!([
        {"text": "x", "bold": 1, "size": {"width": 2}},
        {"header": [], "rows": [[{"text": "orphan"}]], "columnWidths": [70]},
        {"openDrawer": "yes"},
        {"what": "is this"}
    ]));

    let once = normalize(Some(&messy), dialect);
    let rewired: Vec<ContentBlock> = once.iter().map(|b| b.to_wire(dialect)).collect();
    assert_eq!(normalize(Some(&rewired), dialect), once);

    // The unrecognized shape became the default text block.
    assert_eq!(once[3], BuilderBlock::default_text(dialect));
}

#[test]
fn ruler_width_tracks_paper_width() {
    let wire = parse(json!([{"charLine": "-"}]));
    for (width_mm, expected) in [(80.0, 32), (40.0, 16), (58.0, 23)] {
        let mut renderer = offline_renderer(width_mm);
        let preview = renderer.render(&wire);
        match &preview.nodes[0] {
            PreviewNode::Rule(rule) => assert_eq!(rule.len(), expected, "at {width_mm}mm"),
            other => panic!("expected rule node, got {other:?}"),
        }
    }
}

#[test]
fn broken_image_survives_template_edits() {
    let mut renderer = offline_renderer(80.0);
    let mut template = TicketTemplate::from_value(
        Some(&parse(json!([{"src": "http://nowhere/logo.png"}]))),
        Dialect::Full,
    );

    let first = renderer.render(&template.content());
    assert_eq!(first.nodes[0], PreviewNode::Image(ImageSource::Placeholder));

    // Editing other blocks re-renders the same source without retrying it.
    let event = template.add_block(BlockKind::Text);
    let second = renderer.render(event.content());
    assert_eq!(second.nodes[0], PreviewNode::Image(ImageSource::Placeholder));
    assert!(renderer.broken_sources().contains("http://nowhere/logo.png"));
}

#[test]
fn minimal_dialect_round_trips_left_aligned_text() {
    let wire = parse(json!([{"text": "Hi"}]));
    let template = TicketTemplate::from_value(Some(&wire), Dialect::Minimal);
    let content = template.content();
    assert_eq!(
        serde_json::to_value(&content).unwrap(),
        json!([{"text": "Hi", "align": "left"}])
    );
}
