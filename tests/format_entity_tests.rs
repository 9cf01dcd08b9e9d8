//! End-to-end formatting of recorded Wikidata responses.

use assert_matches::assert_matches;
use serde_json::json;
use wikidata_display::{
    DisplayError, EntityType, EntryItem, SparqlResults, format_entity,
};

fn fixture(name: &str) -> SparqlResults {
    let raw = match name {
        "egypt" => include_str!("fixtures/egypt.json"),
        "eiffel_tower" => include_str!("fixtures/eiffel_tower.json"),
        "george_washington" => include_str!("fixtures/george_washington.json"),
        "philosophers_stone" => include_str!("fixtures/philosophers_stone.json"),
        other => panic!("no fixture named {other}"),
    };
    SparqlResults::from_json_str(raw).expect("fixture parses")
}

fn labels(document: &wikidata_display::DisplayDocument) -> Vec<&str> {
    document.labels().collect()
}

#[test]
fn test_format_landmark() {
    let document = format_entity(EntityType::Landmark, &fixture("eiffel_tower")).unwrap();

    let expected = json!({
        "title": "Eiffel Tower",
        "subtitle": "tower located on the Champ de Mars in Paris, France",
        "entries": {
            "Country": [
                {"value": "France", "link": "http://www.wikidata.org/entity/Q142"}
            ],
            "Creation Date": [
                {"value": "January 28, 1887"}
            ]
        }
    });
    assert_eq!(document.to_json_value().unwrap(), expected);
    // territoryLocationLabel is not bound, coordinates is not registered
    assert_eq!(labels(&document), vec!["Country", "Creation Date"]);
}

#[test]
fn test_format_country() {
    let document = format_entity(EntityType::Country, &fixture("egypt")).unwrap();

    let expected = json!({
        "title": "Egypt",
        "subtitle": "sovereign state in North Africa and Asia",
        "entries": {
            "Population": [{"value": "94,798,827"}],
            "Area": [{"value": "1,010,407 km sq."}],
            "Continent": [{"value": "Africa"}, {"value": "Asia"}],
            "Capital": [{"value": "Cairo"}],
            "Head of Government": [{
                "value": "Moustafa Madbouly",
                "link": "http://www.wikidata.org/entity/Q54901515"
            }],
            "Head of State": [{
                "value": "Abdel Fattah el-Sisi",
                "link": "http://www.wikidata.org/entity/Q307871"
            }]
        }
    });
    assert_eq!(document.to_json_value().unwrap(), expected);
    assert_eq!(
        labels(&document),
        vec![
            "Population",
            "Area",
            "Continent",
            "Capital",
            "Head of Government",
            "Head of State"
        ]
    );
}

#[test]
fn test_format_person() {
    let document = format_entity(EntityType::Person, &fixture("george_washington")).unwrap();

    assert_eq!(document.title, "George Washington");
    assert_eq!(document.subtitle, "1st president of the United States (1732-1799)");
    assert_eq!(
        labels(&document),
        vec!["Born", "Died", "Spouse", "Nationality", "Occupation"]
    );
    assert_eq!(document.entry("Born").unwrap(), &[EntryItem::new("February 22, 1732")]);
    assert_eq!(document.entry("Died").unwrap(), &[EntryItem::new("December 14, 1799")]);
    assert_eq!(
        document.entry("Spouse").unwrap(),
        &[EntryItem::linked(
            "Martha Washington",
            "http://www.wikidata.org/entity/Q191789"
        )]
    );
    assert_eq!(
        document.entry("Nationality").unwrap(),
        &[
            EntryItem::linked(
                "United States of America",
                "http://www.wikidata.org/entity/Q30"
            ),
            EntryItem::linked("Great Britain", "http://www.wikidata.org/entity/Q161885"),
        ]
    );
    assert_eq!(document.entry("Occupation").unwrap(), &[EntryItem::new("politician")]);
}

#[test]
fn test_format_book() {
    let document = format_entity(EntityType::Book, &fixture("philosophers_stone")).unwrap();

    let expected = json!({
        "title": "Harry Potter and the Philosopher's Stone",
        "subtitle": "fantasy novel by J. K. Rowling",
        "entries": {
            "Author": [{
                "value": "J. K. Rowling",
                "link": "http://www.wikidata.org/entity/Q34660"
            }],
            "Genre": [
                {"value": "adventure novel"},
                {"value": "young adult literature"},
                {"value": "speculative fiction novel"},
                {"value": "young adult novel"}
            ],
            "Published": [{"value": "June 26, 1997"}]
        }
    });
    assert_eq!(document.to_json_value().unwrap(), expected);

    let genres: Vec<&str> = document
        .entry("Genre")
        .unwrap()
        .iter()
        .map(|item| item.value.as_str())
        .collect();
    assert_eq!(
        genres,
        vec![
            "adventure novel",
            "young adult literature",
            "speculative fiction novel",
            "young adult novel"
        ]
    );
    assert_eq!(document.entry("Author").unwrap().len(), 1);
    assert_eq!(document.entry("Published").unwrap().len(), 1);
}

#[test]
fn test_wrong_registry_only_filters() {
    // A country registry over person results finds no registered fields.
    let document = format_entity(EntityType::Country, &fixture("george_washington")).unwrap();

    assert_eq!(document.title, "George Washington");
    assert!(document.entries.is_empty());
}

#[test]
fn test_document_round_trips_through_json() {
    let document = format_entity(EntityType::Country, &fixture("egypt")).unwrap();

    let text = serde_json::to_string(&document).unwrap();
    let parsed: wikidata_display::DisplayDocument = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed, document);
    assert_eq!(labels(&parsed), labels(&document));
}

#[test]
fn test_empty_response_is_malformed() {
    let results = SparqlResults::from_json_str(
        r#"{"head": {"vars": ["name", "description"]}, "results": {"bindings": []}}"#,
    )
    .unwrap();

    assert_matches!(
        format_entity(EntityType::Book, &results),
        Err(DisplayError::MalformedResponse(_))
    );
}

#[test]
fn test_unparsable_values_pass_through() {
    let results = SparqlResults::from_value(json!({
        "head": {"vars": ["name", "description", "population", "areaKmSquared"]},
        "results": {"bindings": [{
            "name": {"type": "literal", "value": "Atlantis"},
            "description": {"type": "literal", "value": "legendary island"},
            "population": {"type": "literal", "value": "unknown"},
            "areaKmSquared": {"type": "literal", "value": "vast"}
        }]}
    }))
    .unwrap();

    let document = format_entity(EntityType::Country, &results).unwrap();

    assert_eq!(document.entry("Population").unwrap(), &[EntryItem::new("unknown")]);
    assert_eq!(document.entry("Area").unwrap(), &[EntryItem::new("vast")]);
}
