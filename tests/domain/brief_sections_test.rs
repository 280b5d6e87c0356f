use casebrief::domain::{BriefHeading, BriefSections};

const FULL_BRIEF: &str = "Facts: A tenant withheld rent.\n\
Procedural History: The landlord sued in county court.\n\
Issues: Whether withholding was lawful.\n\
Holding: It was not.\n\
Reasoning: No notice of defect was given.\n\
Conclusion: Judgment for the landlord.";

#[test]
fn given_brief_with_all_headings_when_parsing_then_every_section_is_captured() {
    let sections = BriefSections::parse(FULL_BRIEF);

    assert_eq!(sections.get(BriefHeading::Facts), "A tenant withheld rent.");
    assert_eq!(
        sections.get(BriefHeading::ProceduralHistory),
        "The landlord sued in county court."
    );
    assert_eq!(
        sections.get(BriefHeading::Issues),
        "Whether withholding was lawful."
    );
    assert_eq!(sections.get(BriefHeading::Holding), "It was not.");
    assert_eq!(
        sections.get(BriefHeading::Reasoning),
        "No notice of defect was given."
    );
    assert_eq!(
        sections.get(BriefHeading::Conclusion),
        "Judgment for the landlord."
    );
    assert!(sections.missing().is_empty());
}

#[test]
fn given_same_text_when_parsed_twice_then_results_are_identical() {
    let text = "**Facts:** one\n## Holding: two\nstray Reasoning without colon";

    assert_eq!(BriefSections::parse(text), BriefSections::parse(text));
}

#[test]
fn given_mixed_case_headings_when_parsing_then_they_match() {
    let sections = BriefSections::parse("FACTS: loud\nprocedural   history: quiet");

    assert_eq!(sections.get(BriefHeading::Facts), "loud");
    assert_eq!(sections.get(BriefHeading::ProceduralHistory), "quiet");
}

#[test]
fn given_brief_without_procedural_history_when_parsing_then_section_is_empty_and_missing() {
    let text = "Facts: f\nIssues: i\nHolding: h\nReasoning: r\nConclusion: c";

    let sections = BriefSections::parse(text);

    assert_eq!(sections.get(BriefHeading::ProceduralHistory), "");
    assert!(!sections.contains(BriefHeading::ProceduralHistory));
    assert_eq!(sections.missing(), vec![BriefHeading::ProceduralHistory]);
}

#[test]
fn given_out_of_order_headings_when_iterating_then_canonical_order_is_used() {
    let text = "Conclusion: c\nFacts: f\nHolding: h";

    let titles: Vec<&str> = BriefSections::parse(text)
        .iter()
        .map(|(heading, _)| heading.title())
        .collect();

    assert_eq!(
        titles,
        vec![
            "Facts",
            "Procedural History",
            "Issues",
            "Holding",
            "Reasoning",
            "Conclusion"
        ]
    );
}

#[test]
fn given_markdown_emphasis_around_headings_when_parsing_then_markers_are_stripped() {
    let text = "**Facts:** The contract was signed.\n\n### **Holding:** Enforceable.";

    let sections = BriefSections::parse(text);

    assert_eq!(sections.get(BriefHeading::Facts), "The contract was signed.");
    assert_eq!(sections.get(BriefHeading::Holding), "Enforceable.");
}

#[test]
fn given_heading_word_inside_another_word_when_parsing_then_it_is_not_a_heading() {
    let sections = BriefSections::parse("Facts: see Withholding: not a heading");

    assert_eq!(
        sections.get(BriefHeading::Facts),
        "see Withholding: not a heading"
    );
    assert!(!sections.contains(BriefHeading::Holding));
}

#[test]
fn given_repeated_heading_when_parsing_then_last_occurrence_wins() {
    let sections = BriefSections::parse("Facts: first\nFacts: second");

    assert_eq!(sections.get(BriefHeading::Facts), "second");
}

#[test]
fn given_text_without_headings_when_parsing_then_all_sections_are_missing() {
    let sections = BriefSections::parse("The model ignored the format entirely.");

    assert_eq!(sections.missing().len(), 6);
    assert!(sections.iter().all(|(_, content)| content.is_empty()));
}

#[test]
fn given_multiline_section_when_parsing_then_inner_lines_are_kept() {
    let sections = BriefSections::parse("Facts:\n- one\n- two\nHolding: h");

    assert_eq!(sections.get(BriefHeading::Facts), "- one\n- two");
}

#[test]
fn given_heading_word_with_colon_mid_sentence_when_parsing_then_it_stays_in_the_current_section() {
    let text = "Facts: A sued B.\n\
Holding: Affirmed.\n\
Reasoning: The court's holding: rests on the statute.\n\
Conclusion: Done.";

    let sections = BriefSections::parse(text);

    assert_eq!(sections.get(BriefHeading::Holding), "Affirmed.");
    assert_eq!(
        sections.get(BriefHeading::Reasoning),
        "The court's holding: rests on the statute."
    );
    assert_eq!(sections.get(BriefHeading::Conclusion), "Done.");
}

#[test]
fn given_indented_heading_when_parsing_then_it_opens_a_section() {
    let sections = BriefSections::parse("Facts: f\n   - _Holding:_ h");

    assert_eq!(sections.get(BriefHeading::Facts), "f\n   - _Holding:_ h");
    assert!(!sections.contains(BriefHeading::Holding));

    let sections = BriefSections::parse("Facts: f\n   __Holding:__ h");

    assert_eq!(sections.get(BriefHeading::Facts), "f");
    assert_eq!(sections.get(BriefHeading::Holding), "h");
}

#[test]
fn given_section_ending_in_hash_when_parsing_then_content_is_kept() {
    let sections = BriefSections::parse("Facts: The contract was written in C#\n## Holding: h");

    assert_eq!(
        sections.get(BriefHeading::Facts),
        "The contract was written in C#"
    );
    assert_eq!(sections.get(BriefHeading::Holding), "h");
}
