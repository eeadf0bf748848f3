use wiki_quiz_backend::services::scoring_service::ScoringService;
use wiki_quiz_backend::services::scraper_service::{extract_article, MAX_ARTICLE_CHARS};
use wiki_quiz_backend::services::synthesis_service::{fallback_payload, parse_quiz_response};
use wiki_quiz_backend::utils::validation::is_valid_wikipedia_url;

const ARTICLE_HTML: &str = r##"<!DOCTYPE html>
<html>
<head><title>Alan Turing - Wikipedia</title><style>.x { color: red; }</style></head>
<body>
  <h1 id="firstHeading" class="firstHeading mw-first-heading"><span class="mw-page-title-main">Alan Turing</span></h1>
  <div id="mw-content-text" class="mw-body-content">
    <div class="mw-parser-output">
      <table class="infobox"><tr><td><p>Born 23 June 1912</p></td></tr></table>
      <p><b>Alan Mathison Turing</b> was an English mathematician and computer scientist.<sup id="cite_ref-1" class="reference"><a href="#cite_note-1">[1]</a></sup></p>
      <figure><figcaption>Turing in 1936</figcaption></figure>
      <p>He was highly influential in the development of theoretical computer science.[2][3]</p>
      <script>var x = 1;</script>
    </div>
  </div>
</body>
</html>"##;

#[test]
fn wikipedia_article_urls_are_recognized() {
    assert!(is_valid_wikipedia_url("https://en.wikipedia.org/wiki/Alan_Turing"));
    assert!(is_valid_wikipedia_url("https://de.wikipedia.org/wiki/Alan_Turing"));
    assert!(!is_valid_wikipedia_url("https://en.wikipedia.org/w/index.php?title=Alan_Turing"));
    assert!(!is_valid_wikipedia_url("https://en.wikipedia.org.evil.test/wiki/Alan_Turing"));
    assert!(!is_valid_wikipedia_url("ftp://en.wikipedia.org/wiki/Alan_Turing"));
}

#[test]
fn article_page_is_reduced_to_prose() {
    let article = extract_article(ARTICLE_HTML);
    assert_eq!(article.title.as_deref(), Some("Alan Turing"));
    assert_eq!(
        article.text.as_deref(),
        Some(
            "Alan Mathison Turing was an English mathematician and computer scientist. \
             He was highly influential in the development of theoretical computer science."
        )
    );
}

#[test]
fn article_text_never_exceeds_cap() {
    let body = "<p>Ω and more text. </p>".repeat(2_000);
    let html = format!(
        r#"<h1 class="firstHeading">Omega</h1><div id="mw-content-text">{}</div>"#,
        body
    );
    let text = extract_article(&html).text.unwrap();
    assert_eq!(text.chars().count(), MAX_ARTICLE_CHARS);
}

#[test]
fn model_output_scores_end_to_end() {
    let raw = r#"```json
{
  "summary": "Turing was a mathematician.",
  "key_entities": {"people": ["Alan Turing"], "organizations": ["Bletchley Park"], "locations": ["London"]},
  "sections": ["Early life", "Career"],
  "quiz": [
    {"question": "Where was Turing born?", "options": ["A) London", "B) Paris", "C) Rome", "D) Oslo"], "answer": "A) London", "difficulty": "easy", "explanation": "Born in Maida Vale."},
    {"question": "Which field?", "options": ["A) Art", "B) Computing", "C) Law", "D) Music"], "answer": "b", "difficulty": "medium", "explanation": "Computer science."}
  ],
  "related_topics": ["Enigma machine", "Turing test"]
}
```"#;

    let payload = parse_quiz_response(raw).unwrap();
    assert_eq!(payload.quiz[0].answer, "A");
    assert_eq!(payload.quiz[1].answer, "B");

    let answers = vec!["A".to_string(), "C".to_string()];
    let card = ScoringService::score(&payload.quiz, &answers);
    assert_eq!((card.correct, card.total, card.score), (1, 2, 50.0));
}

#[test]
fn fallback_quiz_is_answerable() {
    let payload = fallback_payload();
    let card = ScoringService::score(&payload.quiz, &["B".to_string()]);
    assert_eq!(card.score, 100.0);
    assert_eq!(payload.summary, "Failed to generate summary due to API error");
}
