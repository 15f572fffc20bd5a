use indoc::indoc;
use xenpath::{Document, Match, PropertyValue, XenError};

const CUSTOMER_XML: &str = indoc! {r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <dongle xmlns:m="myns">
      <m:customer someattr="123">
        <id>CUSTOMER_03</id>
        <name>Boomer Institute</name>
        <m:address>Montara CA</m:address>
        <email addr="address1" />
        <email addr="address2"/>
        <memo/>
        <fixed_pool_id/>
        <![CDATA[<sender>John Smith</sender>]]>
      </m:customer>
      <id>DONGLE_01</id>
    </dongle>
"#};

fn parse() -> Document {
    Document::parse_str(CUSTOMER_XML).unwrap()
}

#[test]
fn test_navigation() {
    let doc = parse();
    let root = doc.root();
    assert_eq!(root.name(), "dongle");
    assert_eq!(root.get_text("id").unwrap(), Some("DONGLE_01"));

    let customer = root.one("m:customer").unwrap().as_node().unwrap();
    assert_eq!(customer.name(), "m:customer");
    assert_eq!(customer.get_text("/id").unwrap(), Some("DONGLE_01"));
    assert_eq!(customer.get_text("/m:customer/name").unwrap(), Some("Boomer Institute"));
    assert_eq!(customer.get_text(".././id").unwrap(), Some("DONGLE_01"));
    assert_eq!(customer.attribute("someattr"), "123");
    assert_eq!(customer.absolute_path(), "/m:customer");
    assert_eq!(root.get_text("customer/not there").unwrap(), None);
}

#[test]
fn test_cdata_and_children() {
    let doc = parse();
    let customer = doc.root().children("m:customer")[0];
    assert_eq!(customer.text(), "<sender>John Smith</sender>");
    assert_eq!(customer.children("*").len(), 7);
    assert_eq!(customer.children("email").len(), 2);
}

#[test]
fn test_ambiguous_queries_name_the_path() {
    let doc = parse();
    let customer = doc.root().children("m:customer")[0];

    let err = customer.get("email").unwrap_err();
    assert_eq!(err.to_string(), "multiple elements found for <email> (2 matches)");

    let err = customer.one(&["email", "@addr"]).unwrap_err();
    assert!(matches!(err, XenError::AmbiguousMatch { count: 2, .. }));
    assert_eq!(err.path(), Some("email/@addr"));
}

#[test]
fn test_attribute_paths_in_both_syntaxes() {
    let doc = parse();
    let root = doc.root();
    let customer = root.children("m:customer")[0];

    assert_eq!(customer.get_text(&["email[1]", "@addr"]).unwrap(), Some("address1"));
    assert_eq!(customer.get_text(&["email[2]", "@addr"]).unwrap(), Some("address2"));
    assert_eq!(customer.get_text(&[".email[0]", "@addr"]).unwrap(), Some("address1"));
    assert_eq!(customer.get_text(&[".email[1]", "@addr"]).unwrap(), Some("address2"));
    assert_eq!(customer.all_text(&["email", "@addr"]).unwrap(), ["address1", "address2"]);

    assert_eq!(root.one_text(".m:customer.email[0].@addr").unwrap(), "address1");
    assert_eq!(root.one_text("/m:customer/email[1]/@addr").unwrap(), "address1");
    assert_eq!(root.get_attr("m:customer/@someattr").unwrap(), Some("123"));
}

#[test]
fn test_attribute_predicates() {
    let doc = parse();
    let root = doc.root();
    assert_eq!(root.all("m:customer[@someattr]").unwrap().len(), 1);
    assert_eq!(root.all("m:customer[@someattr='123']").unwrap().len(), 1);
    assert_eq!(root.all("m:customer[@someattr~'\\d+']").unwrap().len(), 1);
    assert!(root.all("m:customer[@someattrnotthere]").unwrap().is_empty());
    assert!(root.all("m:customer[@someattr='xxx']").unwrap().is_empty());
    assert!(root.all_text("m:customer/@someattrnotthere").unwrap().is_empty());
}

#[test]
fn test_attribute_match_is_a_leaf() {
    let doc = parse();
    let attr = doc.root().one("m:customer/@someattr").unwrap();
    assert!(attr.is_attribute());
    assert_eq!(attr.name(), "@someattr");
    assert_eq!(attr.text(), "123");
    assert_eq!(attr.to_f64().unwrap(), 123.0);
    assert_eq!(attr.to_i64().unwrap(), 123);
    assert_eq!(attr.parent().map(|p| p.name()), Some("m:customer"));
    assert!(attr.as_node().is_none());
}

#[test]
fn test_attribute_mutation() {
    let mut doc = parse();
    let customer = doc.root().children("m:customer")[0].id();

    doc.put_attributes(customer, &["foo", "bar"]).unwrap();
    assert!(doc.node(customer).has_attribute("foo"));
    assert!(!doc.node(customer).has_attribute("name"));
    assert_eq!(doc.root().get_text(&["m:customer", "@foo"]).unwrap(), Some("bar"));

    doc.remove_attribute(customer, "foo");
    assert!(!doc.node(customer).has_attribute("foo"));
}

#[test]
fn test_traversal_orders() {
    let doc = parse();
    let root = doc.root();
    assert_eq!(root.breadth_first()[2].to_string(), "<id>DONGLE_01</id>");
    assert_eq!(root.depth_first()[2].to_string(), "<id>CUSTOMER_03</id>");
    assert_eq!(
        root.collect_text(true),
        "<sender>John Smith</sender>DONGLE_01CUSTOMER_03Boomer InstituteMontara CA"
    );
}

#[test]
fn test_properties_fall_back_to_ancestors() {
    let mut doc = parse();
    let root = doc.root_id();
    let customer = doc.root().children("m:customer")[0].id();
    doc.set_property(root, "foo1", "bar1");
    doc.set_property(root, "foo2", "bar2");
    doc.set_property(customer, "foo1", "barforcustomer");

    let customer = doc.node(customer);
    assert_eq!(
        customer.property("foo1"),
        Some(&PropertyValue::from("barforcustomer"))
    );
    assert_eq!(customer.property("foo2").and_then(|v| v.as_str()), Some("bar2"));

    let email = customer.one("email[1]").unwrap();
    assert_eq!(email.property("foo1").map(|v| v.to_string()).as_deref(), Some("barforcustomer"));
    assert!(matches!(email, Match::Element(_)));
}
