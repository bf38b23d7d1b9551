//! Doxygen tag file indexer
//!
//! Walks the compounds of a Doxygen tag file and maps each tag to an index
//! entry through a single table of [`TagRule`]s keyed by the tag's `kind`
//! attribute. Container kinds re-dispatch their nested tags through the same
//! table, so one pass over the document covers members of classes, files and
//! namespaces.

use docset_core::{category, DocsetConfig, IndexEntry, DOXYGEN_DIR};
use roxmltree::{Document, Node, ParsingOptions};
use std::path::PathBuf;

use crate::connection::{IndexStore, IndexerError};

/// How the category label of a tag is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRule {
    /// The tag kind with its first letter upper-cased
    Kind,
    Fixed(&'static str),
    /// `Method` when nested in a class or struct, `Function` otherwise
    FunctionOrMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRule {
    pub kind: &'static str,
    pub type_rule: TypeRule,
    /// Suppressed kinds produce no entry and are not descended into
    pub emits: bool,
    /// Names of child elements dispatched after this tag's entry
    pub children: &'static [&'static str],
}

const MEMBERS: &[&str] = &["member"];
const NAMESPACE_CHILDREN: &[&str] = &["struct", "class", "member"];

const fn rule(kind: &'static str, type_rule: TypeRule, children: &'static [&'static str]) -> TagRule {
    TagRule {
        kind,
        type_rule,
        emits: true,
        children,
    }
}

const fn suppressed(kind: &'static str) -> TagRule {
    TagRule {
        kind,
        type_rule: TypeRule::Kind,
        emits: false,
        children: &[],
    }
}

/// Every tag kind the indexer understands
pub const TAG_RULES: &[TagRule] = &[
    rule("file", TypeRule::Fixed(category::FILE), MEMBERS),
    rule("namespace", TypeRule::Kind, NAMESPACE_CHILDREN),
    rule("class", TypeRule::Kind, MEMBERS),
    rule("struct", TypeRule::Kind, MEMBERS),
    rule("union", TypeRule::Kind, MEMBERS),
    rule("function", TypeRule::FunctionOrMethod, &[]),
    rule("define", TypeRule::Kind, &[]),
    rule("enumeration", TypeRule::Fixed(category::ENUM), &[]),
    rule("enumvalue", TypeRule::Fixed(category::VALUE), &[]),
    rule("typedef", TypeRule::Fixed(category::TYPE), &[]),
    suppressed("friend"),
    suppressed("variable"),
    suppressed("group"),
    suppressed("page"),
];

/// Look up the rule for a tag kind
pub fn lookup(kind: &str) -> Option<&'static TagRule> {
    TAG_RULES.iter().find(|r| r.kind == kind)
}

/// Text of the first direct child element named `name`, if non-empty
fn child_text<'a>(tag: Node<'a, '_>, name: &str) -> Option<&'a str> {
    tag.children()
        .find(|c| c.is_element() && c.has_tag_name(name))
        .and_then(|c| c.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// The tag's `name` child
pub fn extract_name(tag: Node) -> Option<String> {
    child_text(tag, "name").map(str::to_string)
}

/// The category label for `tag` under `rule`
pub fn extract_type(tag: Node, rule: &TagRule) -> String {
    match rule.type_rule {
        TypeRule::Kind => capitalize(rule.kind),
        TypeRule::Fixed(label) => label.to_string(),
        TypeRule::FunctionOrMethod => {
            let in_type = tag
                .parent_element()
                .and_then(|p| p.attribute("kind"))
                .is_some_and(|k| k == "class" || k == "struct");
            if in_type {
                category::METHOD.to_string()
            } else {
                category::FUNCTION.to_string()
            }
        }
    }
}

/// The page the tag documents, relative to the Doxygen output directory
pub fn extract_path(tag: Node) -> Option<String> {
    let file = child_text(tag, "filename").or_else(|| child_text(tag, "anchorfile"))?;

    let mut path = file.to_string();
    if !path.ends_with(".html") {
        path.push_str(".html");
    }
    if let Some(anchor) = child_text(tag, "anchor") {
        path.push('#');
        path.push_str(anchor);
    }
    Some(path)
}

fn capitalize(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Counters for one Doxygen pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DoxygenReport {
    /// False when no tag file was found
    pub enabled: bool,
    pub entries: usize,
    pub new_entries: usize,
    /// Tags missing a name or a file
    pub skipped: usize,
    /// Tags of suppressed kinds (friend, variable, group, page)
    pub suppressed: usize,
    pub unknown_kinds: usize,
}

/// Indexes a Doxygen tag file into the store
pub struct DoxygenIndexer<'a> {
    store: &'a mut IndexStore,
    tagfile: PathBuf,
    report: DoxygenReport,
}

impl<'a> DoxygenIndexer<'a> {
    pub fn new(store: &'a mut IndexStore, config: &DocsetConfig) -> Self {
        Self::with_tagfile(store, config.tagfile_path())
    }

    pub fn with_tagfile(store: &'a mut IndexStore, tagfile: impl Into<PathBuf>) -> Self {
        Self {
            store,
            tagfile: tagfile.into(),
            report: DoxygenReport::default(),
        }
    }

    /// Whether a tag file exists at the configured location
    pub fn is_enabled(&self) -> bool {
        self.tagfile.is_file()
    }

    /// Index the tag file. A missing tag file disables the pass without error.
    pub fn run(mut self) -> Result<DoxygenReport, IndexerError> {
        tracing::info!(target: "doxygen", "Indexing Doxygen-generated docs..");
        if !self.is_enabled() {
            tracing::info!(
                target: "doxygen",
                "Doxygen docs are disabled, no tagfile found at {}",
                self.tagfile.display()
            );
            return Ok(self.report);
        }

        let xml = std::fs::read_to_string(&self.tagfile)?;
        self.index_xml(&xml)?;

        tracing::info!(
            target: "doxygen",
            "Indexed {} Doxygen entries ({} skipped, {} unknown kinds)",
            self.report.entries,
            self.report.skipped,
            self.report.unknown_kinds
        );
        Ok(self.report)
    }

    /// Index tag file content that has already been read
    pub fn index_xml(&mut self, xml: &str) -> Result<(), IndexerError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(xml, options).map_err(|source| IndexerError::Xml {
            path: self.tagfile.clone(),
            source,
        })?;

        self.report.enabled = true;
        for tag in doc.root_element().children().filter(Node::is_element) {
            self.index_tag(tag)?;
        }
        Ok(())
    }

    fn index_tag(&mut self, tag: Node) -> Result<(), IndexerError> {
        let Some(kind) = tag.attribute("kind") else {
            tracing::warn!(target: "doxygen", "Tag <{}> has no kind attribute", tag.tag_name().name());
            self.report.unknown_kinds += 1;
            return Ok(());
        };
        let Some(rule) = lookup(kind) else {
            tracing::warn!(
                target: "doxygen",
                "Unhandled tag kind ({}) for: {}",
                kind,
                extract_name(tag).unwrap_or_else(|| format!("<{}>", tag.tag_name().name()))
            );
            self.report.unknown_kinds += 1;
            return Ok(());
        };
        self.handle(tag, rule)
    }

    fn handle(&mut self, tag: Node, rule: &TagRule) -> Result<(), IndexerError> {
        if !rule.emits {
            self.report.suppressed += 1;
            return Ok(());
        }

        let (Some(name), Some(path)) = (extract_name(tag), extract_path(tag)) else {
            tracing::debug!(
                target: "doxygen",
                "Skipping {} tag without name or file (line {})",
                rule.kind,
                tag.document().text_pos_at(tag.range().start).row
            );
            self.report.skipped += 1;
            return Ok(());
        };

        let entry = IndexEntry::new(name, extract_type(tag, rule), format!("{DOXYGEN_DIR}/{path}"))?;
        self.report.entries += 1;
        if self.store.insert_entry(&entry)? {
            self.report.new_entries += 1;
        }

        for child in tag
            .children()
            .filter(|c| c.is_element() && rule.children.contains(&c.tag_name().name()))
        {
            self.index_tag(child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_tag<'a, 'i>(doc: &'a Document<'i>, kind: &str) -> Node<'a, 'i> {
        doc.descendants()
            .find(|n| n.attribute("kind") == Some(kind))
            .unwrap()
    }

    fn rows(store: &IndexStore) -> Vec<(String, String, String)> {
        let conn = store.connection().unwrap();
        let mut stmt = conn
            .prepare("SELECT name, type, path FROM searchIndex ORDER BY id")
            .unwrap();
        stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    }

    fn index(xml: &str) -> (IndexStore, DoxygenReport) {
        let mut store = IndexStore::open_in_memory().unwrap();
        let mut indexer = DoxygenIndexer::with_tagfile(&mut store, "llvm.tags");
        indexer.index_xml(xml).unwrap();
        let report = indexer.report.clone();
        (store, report)
    }

    #[test]
    fn test_every_kind_has_one_rule() {
        let kinds = [
            "file", "namespace", "class", "struct", "union", "function", "define", "friend",
            "enumeration", "enumvalue", "typedef", "variable", "group", "page",
        ];
        for kind in kinds {
            assert_eq!(TAG_RULES.iter().filter(|r| r.kind == kind).count(), 1, "{kind}");
        }
        assert_eq!(TAG_RULES.len(), kinds.len());
        assert!(lookup("concept").is_none());
    }

    #[test]
    fn test_function_type_depends_on_parent() {
        let xml = r#"<tagfile>
            <compound kind="class"><name>A</name><filename>classA</filename>
                <member kind="function"><name>f</name><anchorfile>classA.html</anchorfile><anchor>a1</anchor></member>
            </compound>
            <compound kind="struct"><name>S</name><filename>structS</filename>
                <member kind="function"><name>g</name><anchorfile>structS.html</anchorfile><anchor>a2</anchor></member>
            </compound>
            <compound kind="file"><name>a.h</name><filename>a_8h</filename>
                <member kind="function"><name>h</name><anchorfile>a_8h.html</anchorfile><anchor>a3</anchor></member>
            </compound>
        </tagfile>"#;
        let doc = Document::parse(xml).unwrap();
        let rule = lookup("function").unwrap();
        let functions: Vec<String> = doc
            .descendants()
            .filter(|n| n.attribute("kind") == Some("function"))
            .map(|n| extract_type(n, rule))
            .collect();
        assert_eq!(functions, vec!["Method", "Method", "Function"]);
    }

    #[test]
    fn test_fixed_and_default_types() {
        let xml = r#"<tagfile>
            <compound kind="namespace"><name>llvm</name><filename>namespacellvm</filename>
                <member kind="typedef"><name>T</name></member>
                <member kind="enumeration"><name>E</name></member>
                <member kind="enumvalue"><name>V</name></member>
                <member kind="define"><name>D</name></member>
            </compound>
        </tagfile>"#;
        let doc = Document::parse(xml).unwrap();
        let ty = |kind: &str| extract_type(first_tag(&doc, kind), lookup(kind).unwrap());
        assert_eq!(ty("typedef"), "Type");
        assert_eq!(ty("enumeration"), "Enum");
        assert_eq!(ty("enumvalue"), "Value");
        assert_eq!(ty("define"), "Define");
        assert_eq!(ty("namespace"), "Namespace");
    }

    #[test]
    fn test_extract_path() {
        let xml = r#"<tagfile>
            <compound kind="class"><name>A</name><filename>classA</filename></compound>
            <compound kind="file"><name>b.h</name><filename>b_8h.html</filename></compound>
            <compound kind="struct"><name>S</name><anchorfile>structS</anchorfile><anchor>x1</anchor></compound>
            <compound kind="union"><name>U</name></compound>
            <compound kind="define"><name>M</name><anchorfile>m.html</anchorfile><anchor></anchor></compound>
        </tagfile>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(extract_path(first_tag(&doc, "class")).as_deref(), Some("classA.html"));
        assert_eq!(extract_path(first_tag(&doc, "file")).as_deref(), Some("b_8h.html"));
        assert_eq!(extract_path(first_tag(&doc, "struct")).as_deref(), Some("structS.html#x1"));
        assert_eq!(extract_path(first_tag(&doc, "union")), None);
        assert_eq!(extract_path(first_tag(&doc, "define")).as_deref(), Some("m.html"));
    }

    #[test]
    fn test_extract_name() {
        let xml = r#"<tagfile>
            <compound kind="class"><name>llvm::Foo&lt;T&gt;</name><member kind="function"><name>x</name></member></compound>
            <compound kind="struct"><filename>s</filename></compound>
        </tagfile>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(extract_name(first_tag(&doc, "class")).as_deref(), Some("llvm::Foo<T>"));
        assert_eq!(extract_name(first_tag(&doc, "struct")), None);
    }

    #[test]
    fn test_nested_namespace_class_method() {
        let xml = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
        <tagfile>
          <compound kind="namespace">
            <name>llvm</name>
            <filename>namespacellvm.html</filename>
            <class kind="class">
              <name>llvm::Module</name>
              <filename>classllvm_1_1Module.html</filename>
              <member kind="function">
                <name>getName</name>
                <anchorfile>classllvm_1_1Module.html</anchorfile>
                <anchor>a1b2</anchor>
              </member>
            </class>
          </compound>
        </tagfile>"#;
        let (store, report) = index(xml);
        assert_eq!(
            rows(&store),
            vec![
                ("llvm".into(), "Namespace".into(), "doxygen/namespacellvm.html".into()),
                ("llvm::Module".into(), "Class".into(), "doxygen/classllvm_1_1Module.html".into()),
                (
                    "getName".into(),
                    "Method".into(),
                    "doxygen/classllvm_1_1Module.html#a1b2".into()
                ),
            ]
        );
        assert_eq!(report.entries, 3);
        assert_eq!(report.new_entries, 3);
    }

    #[test]
    fn test_forward_declared_class_is_skipped() {
        // Namespaces list their classes by name only
        let xml = r#"<tagfile>
          <compound kind="namespace">
            <name>llvm</name>
            <filename>namespacellvm.html</filename>
            <class kind="class">llvm::Value</class>
            <member kind="variable"><name>X</name><anchorfile>n.html</anchorfile><anchor>v</anchor></member>
            <member kind="friend"><name>F</name><anchorfile>n.html</anchorfile><anchor>f</anchor></member>
          </compound>
          <compound kind="page"><name>index</name><filename>index</filename></compound>
          <compound kind="group"><name>g</name><filename>group__g</filename></compound>
        </tagfile>"#;
        let (store, report) = index(xml);
        assert_eq!(rows(&store).len(), 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.suppressed, 4);
    }

    #[test]
    fn test_unknown_kind_is_not_fatal() {
        let xml = r#"<tagfile>
          <compound kind="concept"><name>C</name><filename>conceptC</filename></compound>
          <compound><name>nokind</name></compound>
          <compound kind="file"><name>a.h</name><filename>a_8h</filename>
            <member kind="define"><name>A_H</name><anchorfile>a_8h</anchorfile><anchor>d1</anchor></member>
          </compound>
        </tagfile>"#;
        let (store, report) = index(xml);
        assert_eq!(report.unknown_kinds, 2);
        assert_eq!(
            rows(&store),
            vec![
                ("a.h".into(), "File".into(), "doxygen/a_8h.html".into()),
                ("A_H".into(), "Define".into(), "doxygen/a_8h.html#d1".into()),
            ]
        );
    }

    #[test]
    fn test_duplicate_members_are_stored_once() {
        let xml = r#"<tagfile>
          <compound kind="file"><name>a.h</name><filename>a_8h</filename>
            <member kind="function"><name>f</name><anchorfile>a_8h.html</anchorfile><anchor>x</anchor></member>
            <member kind="function"><name>f</name><anchorfile>a_8h.html</anchorfile><anchor>x</anchor></member>
          </compound>
        </tagfile>"#;
        let (store, report) = index(xml);
        assert_eq!(report.entries, 3);
        assert_eq!(report.new_entries, 2);
        assert_eq!(rows(&store).len(), 2);
    }

    #[test]
    fn test_missing_tagfile_disables_pass() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = IndexStore::open_in_memory().unwrap();
        let indexer = DoxygenIndexer::with_tagfile(&mut store, tmp.path().join("llvm.tags"));
        assert!(!indexer.is_enabled());

        let report = indexer.run().unwrap();
        assert!(!report.enabled);
        assert_eq!(report.entries, 0);
    }

    #[test]
    fn test_malformed_tagfile_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let tagfile = tmp.path().join("llvm.tags");
        std::fs::write(&tagfile, "<tagfile><compound kind=\"class\">").unwrap();

        let mut store = IndexStore::open_in_memory().unwrap();
        let result = DoxygenIndexer::with_tagfile(&mut store, &tagfile).run();
        assert!(matches!(result, Err(IndexerError::Xml { .. })));
    }
}
