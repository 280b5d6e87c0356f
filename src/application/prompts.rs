//! Prompt templates for the three generation stages.

pub fn facts_prompt(full_text: &str) -> String {
    format!(
        "Extract the key facts from this legal document text: {full_text}. \
         Output as a structured list of bullet points under 'Facts:'."
    )
}

pub fn analysis_prompt(facts: &str, full_text: &str) -> String {
    format!(
        "Based on the facts: {facts} and full text: {full_text}, provide a legal analysis \
         including issues, holdings, and reasoning. Structure as sections: Issues, Holding, Reasoning."
    )
}

pub fn synthesis_prompt(facts: &str, analysis: &str, full_text: &str) -> String {
    format!(
        "Synthesize the facts: {facts}, analysis: {analysis}, and full text: {full_text} into a \
         complete case brief. Structure with headings: Facts, Procedural History (infer if needed), \
         Issues, Holding, Reasoning, Conclusion. Write each heading followed by a colon."
    )
}
