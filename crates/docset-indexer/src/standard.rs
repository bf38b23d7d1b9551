//! Standard (Sphinx) documentation indexer
//!
//! Indexes a fixed set of known pages. Each page either lists anchors that
//! map directly to entries ([`PageLayout::Anchors`]) or is the tutorial
//! index, whose chapters are named after their enclosing section
//! ([`PageLayout::Tutorial`]).

use docset_core::{category, DocsetConfig, IndexEntry};
use scraper::{ElementRef, Html, Selector};
use std::path::PathBuf;

use crate::connection::{IndexStore, IndexerError};
use crate::paths::{resolve_href, FILTERED_HREFS};

/// Anchors on a page that belong to one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRule {
    pub selector: &'static str,
    pub category: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLayout {
    Anchors(&'static [SectionRule]),
    Tutorial,
}

/// A known page, relative to the documentation root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRule {
    pub page: &'static str,
    pub layout: PageLayout,
}

const fn section(selector: &'static str, category: &'static str) -> SectionRule {
    SectionRule { selector, category }
}

/// Every page indexed by a standard build, in indexing order
pub const STANDARD_PAGES: &[PageRule] = &[
    PageRule {
        page: "index.html",
        layout: PageLayout::Anchors(&[
            section("#user-guides .docutils a.reference.internal", category::GUIDE),
            section("#programming-documentation .docutils a.reference.internal", category::INSTRUCTION),
            section("#subsystem-documentation .docutils a.reference.internal", category::INSTRUCTION),
            section(
                "#development-process-documentation .docutils a.reference.internal",
                category::INSTRUCTION,
            ),
        ]),
    },
    PageRule {
        page: "ProgrammersManual.html",
        layout: PageLayout::Anchors(&[section("#contents a.reference.internal", category::INSTRUCTION)]),
    },
    PageRule {
        page: "LangRef.html",
        layout: PageLayout::Anchors(&[section(
            r##"#contents a.reference.internal:not([href^="#id"])"##,
            category::SECTION,
        )]),
    },
    PageRule {
        page: "CommandGuide/index.html",
        layout: PageLayout::Anchors(&[
            section("#basic-commands a.reference.internal", category::COMMAND),
            section("#debugging-tools a.reference.internal", category::COMMAND),
            section("#developer-tools a.reference.internal", category::COMMAND),
        ]),
    },
    PageRule {
        page: "GettingStarted.html",
        layout: PageLayout::Anchors(&[section("#contents a.reference.internal[href]", category::GUIDE)]),
    },
    PageRule {
        page: "tutorial/index.html",
        layout: PageLayout::Tutorial,
    },
    PageRule {
        page: "Passes.html",
        layout: PageLayout::Anchors(&[section("#contents a.reference.internal[href]", category::PLUGIN)]),
    },
];

const TUTORIAL_TOC_SELECTOR: &str = ".section[id] .toctree-wrapper, section[id] .toctree-wrapper";

fn compile(selector: &str) -> Result<Selector, IndexerError> {
    Selector::parse(selector).map_err(|e| IndexerError::Selector {
        selector: selector.to_string(),
        message: format!("{e:?}"),
    })
}

/// Display name of an anchor: all nested text, newlines removed
pub fn anchor_name(anchor: ElementRef) -> String {
    anchor.text().collect::<String>().replace('\n', "")
}

/// Section heading text without the trailing permalink marker
fn section_title(heading: ElementRef) -> String {
    let text = anchor_name(heading);
    let text = text.trim_end();
    text.strip_suffix('¶').unwrap_or(text).trim().to_string()
}

/// `"<title> - <n>. <chapter>"` from a link text like `"3. Kaleidoscope: Code generation"`
pub fn chapter_name(title: &str, link_text: &str) -> String {
    let parts: Vec<&str> = link_text.split(": ").collect();
    let chapter_num = parts[0].split('.').next().unwrap_or_default();
    let chapter_title = parts[1..].join(": ");
    format!("{title} - {chapter_num}. {chapter_title}")
}

/// Counters for one standard pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StandardReport {
    pub pages: usize,
    pub entries: usize,
    pub new_entries: usize,
    /// Anchors without text or with a filtered/missing href
    pub skipped: usize,
}

/// Indexes the known Sphinx pages into the store
pub struct StandardIndexer<'a> {
    store: &'a mut IndexStore,
    root: PathBuf,
    pages: &'static [PageRule],
    report: StandardReport,
}

impl<'a> StandardIndexer<'a> {
    pub fn new(store: &'a mut IndexStore, config: &DocsetConfig) -> Self {
        Self::with_root(store, config.documents_dir())
    }

    pub fn with_root(store: &'a mut IndexStore, root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            root: root.into(),
            pages: STANDARD_PAGES,
            report: StandardReport::default(),
        }
    }

    /// Restrict indexing to a different page table
    pub fn with_pages(mut self, pages: &'static [PageRule]) -> Self {
        self.pages = pages;
        self
    }

    /// Index every known page. Fails on the first missing page.
    pub fn run(mut self) -> Result<StandardReport, IndexerError> {
        tracing::info!(target: "standard", "Indexing standard documentation..");
        for rule in self.pages {
            self.index_page(rule)?;
        }
        tracing::info!(
            target: "standard",
            "Indexed {} entries from {} pages ({} anchors skipped)",
            self.report.entries,
            self.report.pages,
            self.report.skipped
        );
        Ok(self.report)
    }

    fn load_page(&self, page: &str) -> Result<Html, IndexerError> {
        let path = self.root.join(page);
        if !path.is_file() {
            return Err(IndexerError::PageNotFound(path));
        }
        let html = std::fs::read_to_string(&path)?;
        Ok(Html::parse_document(&html))
    }

    fn index_page(&mut self, rule: &PageRule) -> Result<(), IndexerError> {
        let html = self.load_page(rule.page)?;
        tracing::debug!(target: "standard", "Indexing page {}", rule.page);

        match rule.layout {
            PageLayout::Anchors(sections) => {
                for section in sections {
                    self.index_section(&html, rule.page, section)?;
                }
            }
            PageLayout::Tutorial => self.index_tutorial(&html, rule.page)?,
        }

        self.report.pages += 1;
        Ok(())
    }

    fn index_section(&mut self, html: &Html, page: &str, section: &SectionRule) -> Result<(), IndexerError> {
        let selector = compile(section.selector)?;
        for anchor in html.select(&selector) {
            let href = anchor.value().attr("href");
            self.index_anchor(anchor_name(anchor), href, section.category, page)?;
        }
        Ok(())
    }

    fn index_tutorial(&mut self, html: &Html, page: &str) -> Result<(), IndexerError> {
        let toc_selector = compile(TUTORIAL_TOC_SELECTOR)?;
        let heading_selector = compile("h2")?;
        let list_selector = compile("ul")?;
        let link_selector = compile("a")?;

        for toc in html.select(&toc_selector) {
            let Some(section) = toc.parent().and_then(ElementRef::wrap) else {
                continue;
            };
            let Some(heading) = section.select(&heading_selector).next() else {
                tracing::debug!(target: "standard", "Tutorial section without heading in {}", page);
                continue;
            };
            let Some(list) = toc.select(&list_selector).next() else {
                continue;
            };
            let title = section_title(heading);

            for chapter in list
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|e| e.value().name() == "li")
            {
                let Some(link) = chapter.select(&link_selector).next() else {
                    continue;
                };
                let name = chapter_name(&title, &anchor_name(link));
                self.index_anchor(name, link.value().attr("href"), category::SAMPLE, page)?;
            }
        }
        Ok(())
    }

    fn index_anchor(
        &mut self,
        name: String,
        href: Option<&str>,
        category: &str,
        page: &str,
    ) -> Result<(), IndexerError> {
        let path = href.and_then(|href| resolve_href(page, href, FILTERED_HREFS));
        let Some(path) = path.filter(|_| !name.trim().is_empty()) else {
            tracing::debug!(
                target: "standard",
                "Skipping anchor '{}' ({:?}) on {}",
                name,
                href,
                page
            );
            self.report.skipped += 1;
            return Ok(());
        };

        let entry = IndexEntry::new(name, category, path)?;
        self.report.entries += 1;
        if self.store.insert_entry(&entry)? {
            self.report.new_entries += 1;
        }
        Ok(())
    }
}
