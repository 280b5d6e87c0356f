mod brief_sections_test;
mod document_test;
