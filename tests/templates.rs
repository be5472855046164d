use tera::{Context, Tera};

use judiciary_web::backend::Page;
use judiciary_web::pagination::Pagination;
use judiciary_web::query::{FieldValue, Intent, QueryController, ViewSnapshot, ViewSpec, ViewState};

const CASES: ViewSpec = ViewSpec {
    name: "cases",
    list_key: "cases",
    page_size: 12,
    sort: Some("-judgment_date"),
    fields: &["search", "court"],
};

fn render_status(view: &ViewSnapshot<String>) -> String {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("partials/macros.html", include_str!("../templates/partials/macros.html")),
        (
            "status.html",
            r#"{% import "partials/macros.html" as macros %}{{ macros::status(view=view, path="/cases", noun="cases") }}"#,
        ),
    ])
    .unwrap();
    let mut context = Context::new();
    context.insert("view", view);
    tera.render("status.html", &context).unwrap()
}

#[test]
fn fetch_in_flight_shows_updating_notice_with_reload_link() {
    let controller = QueryController::<String>::new(CASES);
    let _ticket = controller.begin(Intent::FilterChanged(vec![(
        "court".to_string(),
        FieldValue::text("Lahore High Court"),
    )]));

    let view = controller.snapshot();
    assert_eq!(view.state, ViewState::Loading);

    let html = render_status(&view);
    assert!(html.contains("Results are updating"));
    assert!(html.contains("?court=Lahore+High+Court\">Reload</a>"));
}

#[test]
fn settled_view_has_no_updating_notice() {
    let controller = QueryController::<String>::new(CASES);
    let ticket = controller.begin(Intent::PageChanged(1));
    let outcome = controller.complete(
        ticket,
        Ok(Page {
            items: vec!["Bail granted".to_string()],
            pagination: Pagination::new(1, 12, 1),
        }),
    );

    assert_eq!(outcome.snapshot.state, ViewState::Results);
    let html = render_status(&outcome.snapshot);
    assert!(!html.contains("Results are updating"));
    assert!(html.contains("1 cases"));
}
