#![allow(dead_code)]

use std::{fs, path::Path};

use jstrip::cleaner::javascript_cleaner::is_javascript_action;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};

pub struct TestFixtures;

impl TestFixtures {
    /// One page, no scripts anywhere
    pub fn plain_pdf() -> Vec<u8> {
        let (mut doc, _, _) = Self::base_document();
        Self::to_bytes(&mut doc)
    }

    /// Scripts in the open action, the name tree, page and form triggers,
    /// and a link annotation that also carries a harmless URI action
    pub fn javascript_pdf() -> Vec<u8> {
        let (mut doc, catalog_id, page_id) = Self::base_document();

        let open_id = doc.add_object(Self::script("app.alert('open');"));
        let named_id = doc.add_object(Self::script("var hidden = 1;"));
        let tree_id = doc.add_object(dictionary! {
            "Names" => vec![Object::string_literal("startup"), named_id.into()],
        });
        let link_id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
            "A" => dictionary! { "S" => "URI", "URI" => Object::string_literal("https://example.com") },
        });
        let widget_id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Tx",
            "T" => Object::string_literal("total"),
            "AA" => dictionary! { "C" => Self::script("AFSimple_Calculate('SUM');") },
        });

        if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
            page.set("Annots", vec![link_id.into(), widget_id.into()]);
            page.set("AA", dictionary! { "O" => Self::script("this.print();") });
        }
        if let Ok(Object::Dictionary(catalog)) = doc.get_object_mut(catalog_id) {
            catalog.set("OpenAction", open_id);
            catalog.set("Names", dictionary! { "JavaScript" => tree_id });
            catalog.set("AcroForm", dictionary! { "Fields" => vec![widget_id.into()] });
        }
        Self::to_bytes(&mut doc)
    }

    /// AcroForm carrying only an XFA form definition
    pub fn xfa_pdf() -> Vec<u8> {
        let (mut doc, catalog_id, _) = Self::base_document();
        if let Ok(Object::Dictionary(catalog)) = doc.get_object_mut(catalog_id) {
            catalog.set(
                "AcroForm",
                dictionary! { "Fields" => Vec::<Object>::new(), "XFA" => Object::string_literal("<xdp:xdp/>") },
            );
        }
        Self::to_bytes(&mut doc)
    }

    /// Plain document whose trailer names an encryption dictionary
    pub fn encrypted_pdf() -> Vec<u8> {
        let (mut doc, _, _) = Self::base_document();
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 1,
            "R" => 2,
            "O" => Object::string_literal(vec![0u8; 32]),
            "U" => Object::string_literal(vec![0u8; 32]),
            "P" => -4,
        });
        doc.trailer.set("Encrypt", encrypt_id);
        Self::to_bytes(&mut doc)
    }

    pub fn corrupt_pdf() -> Vec<u8> {
        b"%PDF-1.4\nthis file was truncated".to_vec()
    }

    pub fn write(path: &Path, bytes: &[u8]) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, bytes).unwrap();
    }

    /// JavaScript actions reachable anywhere in the saved document
    pub fn javascript_action_count(path: &Path) -> usize {
        let doc = Document::load(path).unwrap();
        let mut count = 0;
        for object in doc.objects.values() {
            count += Self::count_in(object);
        }
        count
    }

    pub fn catalog(path: &Path) -> Dictionary {
        let doc = Document::load(path).unwrap();
        doc.catalog().unwrap().clone()
    }

    fn count_in(object: &Object) -> usize {
        match object {
            Object::Dictionary(dict) => {
                let own = usize::from(is_javascript_action(dict));
                own + dict.iter().map(|(_, value)| Self::count_in(value)).sum::<usize>()
            }
            Object::Array(items) => items.iter().map(Self::count_in).sum(),
            Object::Stream(stream) => Self::count_in(&Object::Dictionary(stream.dict.clone())),
            _ => 0,
        }
    }

    fn script(code: &str) -> Dictionary {
        dictionary! {
            "Type" => "Action",
            "S" => "JavaScript",
            "JS" => Object::string_literal(code),
        }
    }

    fn base_document() -> (Document, ObjectId, ObjectId) {
        let mut doc = Document::with_version("1.7");
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

    fn to_bytes(doc: &mut Document) -> Vec<u8> {
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }
}
