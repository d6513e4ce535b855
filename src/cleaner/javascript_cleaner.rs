//! JavaScript Cleaner
//! Finds and removes JavaScript actions and script triggers from a loaded
//! `lopdf` document: catalog open actions, the JavaScript name tree, page
//! and form additional-actions, and script actions hanging off annotations,
//! form fields, outline items and action chains.

use std::collections::BTreeSet;

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{CleanerError, Result};

/// Keys whose value is a single action or an array of actions
const ACTION_KEYS: [&[u8]; 2] = [b"A", b"Next"];

/// Reference chains longer than this are treated as broken
const MAX_REFERENCE_DEPTH: usize = 8;

/// What a read-only scan found in a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaScriptScan {
    pub open_action: bool,
    pub document_actions: bool,
    pub names_tree: bool,
    pub page_actions: usize,
    pub form_actions: bool,
    pub xfa_forms: bool,
    pub javascript_actions: usize,
    pub script_entries: usize,
}

impl JavaScriptScan {
    /// True when cleaning would change the document
    pub fn needs_cleaning(&self) -> bool {
        self.open_action
            || self.document_actions
            || self.names_tree
            || self.page_actions > 0
            || self.form_actions
            || self.xfa_forms
            || self.javascript_actions > 0
            || self.script_entries > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaScriptCleaningResult {
    pub open_actions_removed: usize,
    pub additional_actions_removed: usize,
    pub script_actions_removed: usize,
    pub names_entries_removed: usize,
    pub form_entries_removed: usize,
    pub script_entries_removed: usize,
    pub objects_pruned: usize,
}

impl JavaScriptCleaningResult {
    /// Number of entries removed from the object graph, pruning excluded
    pub fn total_removed(&self) -> usize {
        self.open_actions_removed
            + self.additional_actions_removed
            + self.script_actions_removed
            + self.names_entries_removed
            + self.form_entries_removed
            + self.script_entries_removed
    }
}

#[derive(Debug, Clone)]
pub struct JavaScriptCleaner {
    strip_xfa: bool,
    prune_unreferenced: bool,
}

impl Default for JavaScriptCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaScriptCleaner {
    pub fn new() -> Self {
        Self {
            strip_xfa: true,
            prune_unreferenced: true,
        }
    }

    pub fn with_xfa_removal(mut self, enabled: bool) -> Self {
        self.strip_xfa = enabled;
        self
    }

    pub fn with_pruning(mut self, enabled: bool) -> Self {
        self.prune_unreferenced = enabled;
        self
    }

    /// Detect JavaScript without modifying the document
    pub fn scan(&self, document: &Document) -> JavaScriptScan {
        let mut scan = JavaScriptScan::default();

        if let Some(catalog) = catalog_id(document).and_then(|id| dictionary_at(document, id)) {
            scan.open_action = catalog.has(b"OpenAction");
            scan.document_actions = catalog.has(b"AA");

            if let Some(names) = entry_dictionary(document, catalog, b"Names") {
                scan.names_tree = names.has(b"JavaScript");
            }
            if let Some(form) = entry_dictionary(document, catalog, b"AcroForm") {
                scan.form_actions = form.has(b"AA");
                scan.xfa_forms = self.strip_xfa && form.has(b"XFA");
            }
        }

        scan.page_actions = document
            .get_pages()
            .values()
            .filter_map(|id| dictionary_at(document, *id))
            .filter(|page| page.has(b"AA"))
            .count();

        for object in document.objects.values() {
            count_scripts(object, &mut scan);
        }

        scan
    }

    /// Remove all JavaScript actions and triggers from the document
    #[instrument(skip(self, document))]
    pub fn clean(&self, document: &mut Document) -> Result<JavaScriptCleaningResult> {
        let mut result = JavaScriptCleaningResult::default();
        let catalog = catalog_id(document).ok_or(CleanerError::MissingCatalog)?;

        self.clean_catalog(document, catalog, &mut result)?;
        self.clean_acroform(document, catalog, &mut result);
        self.clean_pages(document, &mut result);
        self.sweep_actions(document, &mut result);

        if self.prune_unreferenced {
            result.objects_pruned = document.prune_objects().len();
        }

        info!(
            "Removed {} JavaScript entries ({} objects pruned)",
            result.total_removed(),
            result.objects_pruned
        );
        Ok(result)
    }

    /// Catalog-level triggers: open action, document actions, name tree
    fn clean_catalog(
        &self,
        document: &mut Document,
        catalog: ObjectId,
        result: &mut JavaScriptCleaningResult,
    ) -> Result<()> {
        {
            let dict = document
                .get_object_mut(catalog)
                .and_then(Object::as_dict_mut)
                .map_err(|e| CleanerError::InvalidCatalog(e.to_string()))?;

            if dict.remove(b"OpenAction").is_some() {
                debug!("Removed catalog /OpenAction");
                result.open_actions_removed += 1;
            }
            if dict.remove(b"AA").is_some() {
                debug!("Removed catalog /AA");
                result.additional_actions_removed += 1;
            }
        }

        let names_emptied = edit_entry_dictionary(document, catalog, b"Names", |names| {
            let removed = names.remove(b"JavaScript").is_some();
            (removed, names.is_empty())
        });

        if let Some((removed, empty)) = names_emptied {
            if removed {
                debug!("Removed /JavaScript name tree");
                result.names_entries_removed += 1;
            }
            if empty {
                if let Ok(dict) = document.get_object_mut(catalog).and_then(Object::as_dict_mut) {
                    dict.remove(b"Names");
                }
            }
        }

        Ok(())
    }

    fn clean_acroform(
        &self,
        document: &mut Document,
        catalog: ObjectId,
        result: &mut JavaScriptCleaningResult,
    ) {
        let strip_xfa = self.strip_xfa;
        let removed = edit_entry_dictionary(document, catalog, b"AcroForm", |form| {
            let mut removed = usize::from(form.remove(b"AA").is_some());
            if strip_xfa && form.remove(b"XFA").is_some() {
                removed += 1;
            }
            removed
        });

        if let Some(removed) = removed.filter(|n| *n > 0) {
            debug!("Removed {} AcroForm entries", removed);
            result.form_entries_removed += removed;
        }
    }

    fn clean_pages(&self, document: &mut Document, result: &mut JavaScriptCleaningResult) {
        let pages: Vec<ObjectId> = document.get_pages().into_values().collect();

        for page_id in pages {
            if let Ok(page) = document.get_object_mut(page_id).and_then(Object::as_dict_mut) {
                if page.remove(b"AA").is_some() {
                    debug!("Removed /AA from page {:?}", page_id);
                    result.additional_actions_removed += 1;
                }
            }
        }
    }

    /// Strip script actions from every remaining dictionary in the graph
    fn sweep_actions(&self, document: &mut Document, result: &mut JavaScriptCleaningResult) {
        let script_ids: BTreeSet<ObjectId> = document
            .objects
            .iter()
            .filter(|(_, object)| object.as_dict().map(is_javascript_action).unwrap_or(false))
            .map(|(id, _)| *id)
            .collect();

        let mut trigger_ids = BTreeSet::new();
        for object in document.objects.values() {
            collect_trigger_targets(object, &mut trigger_ids);
        }

        let ids: Vec<ObjectId> = document.objects.keys().copied().collect();
        for id in ids {
            if script_ids.contains(&id) {
                continue;
            }
            let Ok(object) = document.get_object_mut(id) else {
                continue;
            };

            if trigger_ids.contains(&id) {
                if let Object::Dictionary(triggers) = object {
                    result.additional_actions_removed += strip_triggers(triggers, &script_ids);
                }
            }
            sweep_object(object, &script_ids, result);
        }

        // holders of an emptied indirect /AA lose the entry, as inline ones do
        let emptied: BTreeSet<ObjectId> = trigger_ids
            .into_iter()
            .filter(|id| dictionary_at(document, *id).map(Dictionary::is_empty).unwrap_or(false))
            .collect();
        if !emptied.is_empty() {
            for object in document.objects.values_mut() {
                drop_emptied_triggers(object, &emptied);
            }
        }
    }
}

/// True for an action dictionary of type JavaScript
pub fn is_javascript_action(dict: &Dictionary) -> bool {
    matches!(dict.get(b"S").and_then(Object::as_name), Ok(name) if name == b"JavaScript")
}

fn is_script_value(value: &Object, script_ids: &BTreeSet<ObjectId>) -> bool {
    match value {
        Object::Dictionary(dict) => is_javascript_action(dict),
        Object::Reference(id) => script_ids.contains(id),
        _ => false,
    }
}

fn catalog_id(document: &Document) -> Option<ObjectId> {
    document.trailer.get(b"Root").and_then(Object::as_reference).ok()
}

fn resolve<'a>(document: &'a Document, mut object: &'a Object) -> Option<&'a Object> {
    for _ in 0..MAX_REFERENCE_DEPTH {
        match object {
            Object::Reference(id) => object = document.get_object(*id).ok()?,
            _ => return Some(object),
        }
    }
    None
}

fn dictionary_at(document: &Document, id: ObjectId) -> Option<&Dictionary> {
    document.get_object(id).and_then(Object::as_dict).ok()
}

fn entry_dictionary<'a>(document: &'a Document, holder: &'a Dictionary, key: &[u8]) -> Option<&'a Dictionary> {
    let value = holder.get(key).ok()?;
    resolve(document, value)?.as_dict().ok()
}

/// Runs `edit` on the dictionary stored under `key` of the holder object,
/// whether it is inline or an indirect object.
fn edit_entry_dictionary<R>(
    document: &mut Document,
    holder: ObjectId,
    key: &[u8],
    edit: impl FnOnce(&mut Dictionary) -> R,
) -> Option<R> {
    let target = match dictionary_at(document, holder)?.get(key) {
        Ok(Object::Reference(id)) => Some(*id),
        Ok(Object::Dictionary(_)) => None,
        _ => return None,
    };

    let dict = match target {
        Some(id) => document.get_object_mut(id).and_then(Object::as_dict_mut).ok()?,
        None => document
            .get_object_mut(holder)
            .and_then(Object::as_dict_mut)
            .and_then(|dict| dict.get_mut(key))
            .and_then(Object::as_dict_mut)
            .ok()?,
    };
    Some(edit(dict))
}

fn count_scripts(object: &Object, scan: &mut JavaScriptScan) {
    match object {
        Object::Dictionary(dict) => {
            if is_javascript_action(dict) {
                scan.javascript_actions += 1;
            } else if dict.has(b"JS") {
                scan.script_entries += 1;
            }
            for (_, value) in dict.iter() {
                count_scripts(value, scan);
            }
        }
        Object::Stream(stream) => count_scripts_in_dict(&stream.dict, scan),
        Object::Array(items) => items.iter().for_each(|item| count_scripts(item, scan)),
        _ => {}
    }
}

fn count_scripts_in_dict(dict: &Dictionary, scan: &mut JavaScriptScan) {
    for (_, value) in dict.iter() {
        count_scripts(value, scan);
    }
}

/// Objects referenced through an `/AA` entry are additional-actions dictionaries
fn collect_trigger_targets(object: &Object, targets: &mut BTreeSet<ObjectId>) {
    match object {
        Object::Dictionary(dict) => collect_trigger_targets_in_dict(dict, targets),
        Object::Stream(stream) => collect_trigger_targets_in_dict(&stream.dict, targets),
        Object::Array(items) => items.iter().for_each(|item| collect_trigger_targets(item, targets)),
        _ => {}
    }
}

fn collect_trigger_targets_in_dict(dict: &Dictionary, targets: &mut BTreeSet<ObjectId>) {
    if let Ok(Object::Reference(id)) = dict.get(b"AA") {
        targets.insert(*id);
    }
    for (_, value) in dict.iter() {
        collect_trigger_targets(value, targets);
    }
}

fn sweep_object(object: &mut Object, script_ids: &BTreeSet<ObjectId>, result: &mut JavaScriptCleaningResult) {
    match object {
        Object::Dictionary(dict) => sweep_dictionary(dict, script_ids, result),
        Object::Stream(stream) => sweep_dictionary(&mut stream.dict, script_ids, result),
        Object::Array(items) => {
            for item in items.iter_mut() {
                sweep_object(item, script_ids, result);
            }
        }
        _ => {}
    }
}

fn sweep_dictionary(dict: &mut Dictionary, script_ids: &BTreeSet<ObjectId>, result: &mut JavaScriptCleaningResult) {
    for key in ACTION_KEYS {
        result.script_actions_removed += prune_action_entry(dict, key, script_ids);
    }

    let triggers = match dict.get_mut(b"AA") {
        Ok(Object::Dictionary(triggers)) => {
            let removed = strip_triggers(triggers, script_ids);
            Some((removed, triggers.is_empty()))
        }
        Ok(Object::Reference(_)) | Err(_) => None,
        // malformed: additional-actions must be a dictionary
        Ok(_) => Some((1, true)),
    };
    if let Some((removed, empty)) = triggers {
        result.additional_actions_removed += removed;
        if empty {
            dict.remove(b"AA");
        }
    }

    if !is_javascript_action(dict) && dict.remove(b"JS").is_some() {
        result.script_entries_removed += 1;
    }

    for (_, value) in dict.iter_mut() {
        sweep_object(value, script_ids, result);
    }
}

fn drop_emptied_triggers(object: &mut Object, emptied: &BTreeSet<ObjectId>) {
    let dict = match object {
        Object::Dictionary(dict) => dict,
        Object::Stream(stream) => &mut stream.dict,
        Object::Array(items) => {
            for item in items.iter_mut() {
                drop_emptied_triggers(item, emptied);
            }
            return;
        }
        _ => return,
    };
    if matches!(dict.get(b"AA"), Ok(Object::Reference(id)) if emptied.contains(id)) {
        dict.remove(b"AA");
    }
    for (_, value) in dict.iter_mut() {
        drop_emptied_triggers(value, emptied);
    }
}

/// Removes script actions stored under `key`, returning how many went
fn prune_action_entry(dict: &mut Dictionary, key: &[u8], script_ids: &BTreeSet<ObjectId>) -> usize {
    let (removed, drop_entry) = match dict.get_mut(key) {
        Ok(Object::Array(actions)) => {
            let before = actions.len();
            actions.retain(|action| !is_script_value(action, script_ids));
            let removed = before - actions.len();
            (removed, removed > 0 && actions.is_empty())
        }
        Ok(value) if is_script_value(&*value, script_ids) => (1, true),
        _ => (0, false),
    };

    if drop_entry {
        dict.remove(key);
    }
    removed
}

fn strip_triggers(triggers: &mut Dictionary, script_ids: &BTreeSet<ObjectId>) -> usize {
    let keys: Vec<Vec<u8>> = triggers
        .iter()
        .filter(|(_, value)| is_script_value(value, script_ids))
        .map(|(key, _)| key.clone())
        .collect();

    for key in &keys {
        triggers.remove(key);
    }
    keys.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    fn js(code: &str) -> Dictionary {
        dictionary! {
            "S" => "JavaScript",
            "JS" => Object::string_literal(code),
        }
    }

    fn single_page_document() -> (Document, ObjectId, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        (doc, catalog_id, page_id)
    }

    fn catalog(doc: &Document, id: ObjectId) -> &Dictionary {
        doc.get_object(id).and_then(Object::as_dict).unwrap()
    }

    #[test]
    fn test_javascript_action_detection() {
        assert!(is_javascript_action(&js("app.alert(1)")));
        assert!(!is_javascript_action(&dictionary! { "S" => "URI", "URI" => Object::string_literal("https://example.com") }));
        assert!(!is_javascript_action(&Dictionary::new()));
    }

    #[test]
    fn test_clean_document_scans_clean() {
        let (doc, _, _) = single_page_document();
        let scan = JavaScriptCleaner::new().scan(&doc);
        assert!(!scan.needs_cleaning());
    }

    #[test]
    fn test_open_action_and_names_removed() {
        let (mut doc, catalog_id, _) = single_page_document();
        let action_id = doc.add_object(js("app.alert('open');"));
        let tree_id = doc.add_object(dictionary! {
            "Names" => vec![Object::string_literal("init"), action_id.into()],
        });
        if let Ok(Object::Dictionary(cat)) = doc.get_object_mut(catalog_id) {
            cat.set("OpenAction", action_id);
            cat.set("Names", dictionary! { "JavaScript" => tree_id });
        }

        let cleaner = JavaScriptCleaner::new();
        let scan = cleaner.scan(&doc);
        assert!(scan.open_action);
        assert!(scan.names_tree);
        assert_eq!(scan.javascript_actions, 1);

        let result = cleaner.clean(&mut doc).unwrap();
        assert_eq!(result.open_actions_removed, 1);
        assert_eq!(result.names_entries_removed, 1);
        assert_eq!(result.objects_pruned, 2);

        let cat = catalog(&doc, catalog_id);
        assert!(!cat.has(b"OpenAction"));
        assert!(!cat.has(b"Names"));
        assert!(!cleaner.scan(&doc).needs_cleaning());
    }

    #[test]
    fn test_names_dictionary_kept_when_other_trees_remain() {
        let (mut doc, catalog_id, _) = single_page_document();
        let dests_id = doc.add_object(dictionary! { "Names" => Vec::<Object>::new() });
        let names_id = doc.add_object(dictionary! {
            "JavaScript" => dictionary! { "Names" => vec![Object::string_literal("a"), Object::Dictionary(js("1"))] },
            "Dests" => dests_id,
        });
        if let Ok(Object::Dictionary(cat)) = doc.get_object_mut(catalog_id) {
            cat.set("Names", names_id);
        }

        JavaScriptCleaner::new().clean(&mut doc).unwrap();

        let names = doc.get_object(names_id).and_then(Object::as_dict).unwrap();
        assert!(!names.has(b"JavaScript"));
        assert!(names.has(b"Dests"));
        assert!(catalog(&doc, catalog_id).has(b"Names"));
    }

    #[test]
    fn test_link_annotation_keeps_uri_action() {
        let (mut doc, _, page_id) = single_page_document();
        let link_id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "A" => dictionary! { "S" => "URI", "URI" => Object::string_literal("https://example.com") },
        });
        let widget_id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "A" => js("this.print();"),
            "JS" => Object::string_literal("stray"),
        });
        if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
            page.set("Annots", vec![link_id.into(), widget_id.into()]);
        }

        let result = JavaScriptCleaner::new().clean(&mut doc).unwrap();
        assert_eq!(result.script_actions_removed, 1);
        assert_eq!(result.script_entries_removed, 1);

        let link = doc.get_object(link_id).and_then(Object::as_dict).unwrap();
        assert!(link.has(b"A"));
        let widget = doc.get_object(widget_id).and_then(Object::as_dict).unwrap();
        assert!(!widget.has(b"A"));
        assert!(!widget.has(b"JS"));
    }

    #[test]
    fn test_additional_actions_partially_stripped() {
        let (mut doc, catalog_id, _) = single_page_document();
        let field_id = doc.add_object(dictionary! {
            "FT" => "Tx",
            "T" => Object::string_literal("amount"),
            "AA" => dictionary! {
                "K" => js("AFNumber_Keystroke(2);"),
                "U" => dictionary! { "S" => "GoTo", "D" => vec![Object::Integer(0)] },
            },
        });
        if let Ok(Object::Dictionary(cat)) = doc.get_object_mut(catalog_id) {
            cat.set("AcroForm", dictionary! {
                "Fields" => vec![field_id.into()],
                "AA" => dictionary! { "F" => js("calc();") },
            });
        }

        let result = JavaScriptCleaner::new().clean(&mut doc).unwrap();
        assert_eq!(result.form_entries_removed, 1);
        assert_eq!(result.additional_actions_removed, 1);

        let field = doc.get_object(field_id).and_then(Object::as_dict).unwrap();
        let triggers = field.get(b"AA").and_then(Object::as_dict).unwrap();
        assert!(!triggers.has(b"K"));
        assert!(triggers.has(b"U"));
    }

    #[test]
    fn test_indirect_additional_actions_and_chains() {
        let (mut doc, _, page_id) = single_page_document();
        let script_id = doc.add_object(js("app.launchURL('x');"));
        let triggers_id = doc.add_object(dictionary! { "E" => script_id });
        let annot_id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "AA" => triggers_id,
            "A" => dictionary! {
                "S" => "GoTo",
                "D" => vec![page_id.into(), "Fit".into()],
                "Next" => vec![Object::Dictionary(js("a()")), Object::Dictionary(js("b()"))],
            },
        });
        if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
            page.set("Annots", vec![annot_id.into()]);
            page.set("AA", dictionary! { "O" => js("open()") });
        }

        let cleaner = JavaScriptCleaner::new();
        assert_eq!(cleaner.scan(&doc).page_actions, 1);

        let result = cleaner.clean(&mut doc).unwrap();
        assert_eq!(result.script_actions_removed, 2);
        // page /AA plus the /E trigger
        assert_eq!(result.additional_actions_removed, 2);

        let annot = doc.get_object(annot_id).and_then(Object::as_dict).unwrap();
        let action = annot.get(b"A").and_then(Object::as_dict).unwrap();
        assert!(!action.has(b"Next"));
        assert!(!annot.has(b"AA"));
        assert!(doc.get_object(script_id).is_err());
        assert!(doc.get_object(triggers_id).is_err());
        assert!(!cleaner.scan(&doc).needs_cleaning());
    }

    #[test]
    fn test_indirect_additional_actions_keep_other_triggers() {
        let (mut doc, _, page_id) = single_page_document();
        let triggers_id = doc.add_object(dictionary! {
            "E" => js("enter()"),
            "X" => dictionary! { "S" => "GoTo", "D" => vec![page_id.into(), "Fit".into()] },
        });
        let annot_id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "AA" => triggers_id,
        });
        if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
            page.set("Annots", vec![annot_id.into()]);
        }

        let result = JavaScriptCleaner::new().clean(&mut doc).unwrap();
        assert_eq!(result.additional_actions_removed, 1);

        let annot = doc.get_object(annot_id).and_then(Object::as_dict).unwrap();
        assert_eq!(annot.get(b"AA").and_then(Object::as_reference).unwrap(), triggers_id);
        let triggers = doc.get_object(triggers_id).and_then(Object::as_dict).unwrap();
        assert!(!triggers.has(b"E"));
        assert!(triggers.has(b"X"));
    }

    #[test]
    fn test_xfa_kept_when_disabled() {
        let (mut doc, catalog_id, _) = single_page_document();
        if let Ok(Object::Dictionary(cat)) = doc.get_object_mut(catalog_id) {
            cat.set("AcroForm", dictionary! { "XFA" => Object::string_literal("<xdp/>") });
        }

        let cleaner = JavaScriptCleaner::new().with_xfa_removal(false);
        assert!(!cleaner.scan(&doc).needs_cleaning());
        cleaner.clean(&mut doc).unwrap();

        let form = catalog(&doc, catalog_id).get(b"AcroForm").and_then(Object::as_dict).unwrap();
        assert!(form.has(b"XFA"));
    }

    #[test]
    fn test_missing_catalog_is_an_error() {
        let mut doc = Document::with_version("1.5");
        let err = JavaScriptCleaner::new().clean(&mut doc).unwrap_err();
        assert!(matches!(err, crate::error::Error::CleanerError(CleanerError::MissingCatalog)));
    }
}
