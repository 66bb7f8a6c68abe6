use pretty_assertions::assert_eq;
use uuid::Uuid;
use xrm_plugins::domain::{
    AttributeDescriptor, AttributeKind, EntitySchema, Record, RecordCollection,
};
use xrm_plugins::pipeline::{
    ExecutionContext, MockService, OutputParameter, Plugin, PluginError, ServiceError,
    PARAM_BUSINESS_ENTITY_COLLECTION,
};
use xrm_plugins::richtext_plugin::{RichTextExportPlugin, MSG_EXPORT_TO_EXCEL};

fn account_schema() -> EntitySchema {
    EntitySchema::new("account", "name")
        .with_attribute(AttributeDescriptor::new("name", AttributeKind::Text))
        .with_attribute(
            AttributeDescriptor::new("description", AttributeKind::Memo).with_format("RichText"),
        )
}

/// A context the way the host builds it during an export: the retrieval
/// message fired by the export, with the export invocation as its ancestor.
fn export_context(collection: RecordCollection) -> ExecutionContext {
    let export = ExecutionContext::new(MSG_EXPORT_TO_EXCEL, "account");
    ExecutionContext::new("RetrieveMultiple", "account")
        .with_parent(export)
        .with_output(
            PARAM_BUSINESS_ENTITY_COLLECTION,
            OutputParameter::Collection(collection),
        )
}

fn exported_records(context: &ExecutionContext) -> &Vec<Record> {
    &context
        .output(PARAM_BUSINESS_ENTITY_COLLECTION)
        .expect("collection parameter")
        .as_collection()
        .expect("collection value")
        .records
}

#[test]
fn strips_html_from_rich_text_columns_on_export() {
    let mock = MockService::new();
    mock.expect_schema("account").return_ok(account_schema());

    let record = Record::new("account", Uuid::new_v4())
        .with_text("name", "<b>Plain column</b>")
        .with_text("description", "<p>Hello &amp; welcome</p>");
    let mut context = export_context(RecordCollection::new("account").with_record(record));

    RichTextExportPlugin.execute(&mut context, &mock).unwrap();

    let records = exported_records(&context);
    assert_eq!(records[0].text("description"), Some("Hello & welcome"));
    // "name" carries no rich-text format; its markup must survive.
    assert_eq!(records[0].text("name"), Some("<b>Plain column</b>"));
    mock.verify();
}

#[test]
fn strips_every_record_in_the_batch() {
    let mock = MockService::new();
    mock.expect_schema("account").return_ok(account_schema());

    let first = Record::new("account", Uuid::new_v4())
        .with_text("description", "Line1<br>Line2");
    // No description at all; the plugin must skip it without complaint.
    let second = Record::new("account", Uuid::new_v4()).with_text("name", "Untouched");
    let third = Record::new("account", Uuid::new_v4())
        .with_text("description", "<script>alert(1)</script>Visible");

    let mut context = export_context(
        RecordCollection::new("account")
            .with_record(first)
            .with_record(second)
            .with_record(third),
    );

    RichTextExportPlugin.execute(&mut context, &mock).unwrap();

    let records = exported_records(&context);
    assert_eq!(records[0].text("description"), Some("Line1\nLine2"));
    assert_eq!(records[1].text("name"), Some("Untouched"));
    assert_eq!(records[2].text("description"), Some("Visible"));
    mock.verify();
}

#[test]
fn finds_the_export_message_deep_in_the_trigger_chain() {
    let mock = MockService::new();
    mock.expect_schema("account").return_ok(account_schema());

    let export = ExecutionContext::new(MSG_EXPORT_TO_EXCEL, "account");
    let middle = ExecutionContext::new("Execute", "account").with_parent(export);
    let record = Record::new("account", Uuid::new_v4()).with_text("description", "<i>x</i>");
    let mut context = ExecutionContext::new("RetrieveMultiple", "account")
        .with_parent(middle)
        .with_output(
            PARAM_BUSINESS_ENTITY_COLLECTION,
            OutputParameter::Collection(RecordCollection::new("account").with_record(record)),
        );

    RichTextExportPlugin.execute(&mut context, &mock).unwrap();

    assert_eq!(exported_records(&context)[0].text("description"), Some("x"));
    mock.verify();
}

#[test]
fn skips_when_no_export_ancestor() {
    let mock = MockService::new();

    let record = Record::new("account", Uuid::new_v4()).with_text("description", "<b>kept</b>");
    let mut context = ExecutionContext::new("RetrieveMultiple", "account").with_output(
        PARAM_BUSINESS_ENTITY_COLLECTION,
        OutputParameter::Collection(RecordCollection::new("account").with_record(record)),
    );

    RichTextExportPlugin.execute(&mut context, &mock).unwrap();

    assert_eq!(
        exported_records(&context)[0].text("description"),
        Some("<b>kept</b>")
    );
    mock.verify();
}

#[test]
fn skips_when_the_collection_parameter_is_missing() {
    let mock = MockService::new();
    let export = ExecutionContext::new(MSG_EXPORT_TO_EXCEL, "account");
    let mut context = ExecutionContext::new("RetrieveMultiple", "account").with_parent(export);

    RichTextExportPlugin.execute(&mut context, &mock).unwrap();
    mock.verify();
}

#[test]
fn skips_an_empty_batch_without_a_schema_lookup() {
    let mock = MockService::new();
    let mut context = export_context(RecordCollection::new("account"));

    RichTextExportPlugin.execute(&mut context, &mock).unwrap();
    mock.verify();
}

#[test]
fn skips_types_without_rich_text_attributes() {
    let mock = MockService::new();
    mock.expect_schema("account").return_ok(
        EntitySchema::new("account", "name")
            .with_attribute(AttributeDescriptor::new("name", AttributeKind::Text)),
    );

    let record = Record::new("account", Uuid::new_v4()).with_text("name", "<b>kept</b>");
    let mut context = export_context(RecordCollection::new("account").with_record(record));

    RichTextExportPlugin.execute(&mut context, &mock).unwrap();

    assert_eq!(exported_records(&context)[0].text("name"), Some("<b>kept</b>"));
    mock.verify();
}

#[test]
fn propagates_schema_lookup_failure() {
    let mock = MockService::new();
    mock.expect_schema("account")
        .return_err(ServiceError::AccessDenied("metadata".into()));

    let record = Record::new("account", Uuid::new_v4()).with_text("description", "<b>x</b>");
    let mut context = export_context(RecordCollection::new("account").with_record(record));

    let result = RichTextExportPlugin.execute(&mut context, &mock);

    assert_eq!(
        result,
        Err(PluginError::Service(ServiceError::AccessDenied(
            "metadata".into()
        )))
    );
    mock.verify();
}
