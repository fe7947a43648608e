use xmpp_forms::{
    process, BobData, FieldHandle, FieldMedia, FieldOption, Form, FormError, FormField, MediaUri,
};
use xmpp_wire::{ConnectionRegistry, StreamDecoder, XmlTokenReader};

fn field(label: &str, kind: &str) -> FormField {
    FormField {
        label: label.into(),
        kind: kind.into(),
        ..FormField::default()
    }
}

fn form(fields: Vec<FormField>) -> Form {
    Form {
        fields,
        ..Form::default()
    }
}

fn untouched(form: &Form, blobs: &[BobData]) -> Form {
    process(form, blobs, |_, _, _| Ok::<_, FormError>(())).expect("process")
}

fn submitted(values: &[&str]) -> FormField {
    FormField::value_only(values.iter().map(|v| v.to_string()).collect())
}

#[test]
fn empty_form_submits_nothing() {
    assert_eq!(
        untouched(&Form::default(), &[]),
        Form {
            kind: "submit".into(),
            ..Form::default()
        }
    );
}

#[test]
fn fixed_fields_are_dropped() {
    let mut with_value = field("hello", "fixed");
    with_value.values = vec!["Something".into()];
    let submission = untouched(&form(vec![with_value, field("hello2", "fixed")]), &[]);
    assert!(submission.fields.is_empty());
    assert!(submission.is_submission());
}

#[test]
fn untouched_boolean_submits_false() {
    let submission = untouched(&form(vec![field("hello3", "boolean")]), &[]);
    assert_eq!(submission.fields, vec![submitted(&["false"])]);
}

#[test]
fn boolean_submits_callback_result() {
    let submission = process(&form(vec![field("hello1o71", "boolean")]), &[], |_, _, handles| {
        let Some(FieldHandle::Boolean(field)) = handles.first_mut() else {
            anyhow::bail!("expected a boolean handle");
        };
        field.result = true;
        Ok(())
    })
    .expect("process");
    assert_eq!(submission.fields, vec![submitted(&["true"])]);
}

#[test]
fn untouched_multi_text_fields_submit_no_value() {
    let mut jids = field("hello4", "jid-multi");
    jids.values = vec!["a@b".into()];
    let submission = untouched(&form(vec![jids, field("hello5", "text-multi")]), &[]);
    assert_eq!(submission.fields, vec![submitted(&[]), submitted(&[])]);
}

#[test]
fn multi_text_submits_callback_results_in_order() {
    let submission = process(&form(vec![field("members", "jid-multi")]), &[], |_, _, handles| {
        if let FieldHandle::MultiText(field) = &mut handles[0] {
            field.results = vec!["juliet@capulet.lit".into(), "romeo@montague.lit".into()];
        }
        Ok::<_, FormError>(())
    })
    .expect("process");
    assert_eq!(
        submission.fields,
        vec![submitted(&["juliet@capulet.lit", "romeo@montague.lit"])]
    );
}

fn with_options(mut field: FormField) -> FormField {
    field.options = vec![FieldOption::new("One", "Two"), FieldOption::new("Three", "Four")];
    field
}

#[test]
fn untouched_list_single_submits_first_option() {
    let submission = untouched(&form(vec![with_options(field("hello7", "list-single"))]), &[]);
    assert_eq!(submission.fields, vec![submitted(&["Two"])]);
}

#[test]
fn untouched_list_multi_submits_no_value() {
    let submission = untouched(&form(vec![with_options(field("hello1o7", "list-multi"))]), &[]);
    assert_eq!(submission.fields, vec![submitted(&[])]);
}

#[test]
fn list_multi_submits_selected_option_values() {
    let source = form(vec![with_options(field("hello1o7", "list-multi"))]);
    let submission = process(&source, &[], |_, _, handles| {
        if let FieldHandle::MultiSelection(field) = &mut handles[0] {
            field.selected = vec![1];
        }
        Ok::<_, FormError>(())
    })
    .expect("process");
    assert_eq!(submission.fields, vec![submitted(&["Four"])]);
}

#[test]
fn hidden_fields_never_submit_a_value() {
    let mut hidden = field("hello1o71", "hidden");
    hidden.values = vec!["secret-token".into()];
    let submission = untouched(&form(vec![hidden]), &[]);
    assert_eq!(submission.fields, vec![submitted(&[])]);
}

#[test]
fn unknown_types_submit_empty_text_ignoring_original_values() {
    let mut with_value = field("hello1o73", "another-fancy-type");
    with_value.values = vec!["another one".into()];
    let submission =
        untouched(&form(vec![field("hello1o71", "another-fancy-type"), with_value]), &[]);
    assert_eq!(submission.fields, vec![submitted(&[""]), submitted(&[""])]);
}

#[test]
fn single_text_submits_callback_result() {
    let submission = process(&form(vec![field("nick", "text-single")]), &[], |_, _, handles| {
        if let FieldHandle::SingleText(field) = &mut handles[0] {
            field.result = "Juliet".into();
        }
        Ok::<_, FormError>(())
    })
    .expect("process");
    assert_eq!(submission.fields, vec![submitted(&["Juliet"])]);
}

#[derive(Debug, thiserror::Error)]
#[error("some kind of error")]
struct SomeKindOfError;

#[test]
fn callback_error_is_returned_verbatim() {
    let err = process(&Form::default(), &[], |_, _, _| Err(anyhow::Error::new(SomeKindOfError)))
        .expect_err("callback failed");
    assert!(err.downcast_ref::<SomeKindOfError>().is_some());
    assert_eq!(err.to_string(), "some kind of error");
}

#[test]
fn media_is_resolved_for_display_but_never_submitted() {
    let blobs = vec![BobData::new("foobax", "....."), BobData::new("foobar", "aGVsbG8=")];
    let mut hidden = field("hello1o7", "hidden");
    hidden.media = vec![FieldMedia {
        uris: vec![
            MediaUri::new("", ""),
            MediaUri::new("", "hello:world"),
            MediaUri::new("", "cid:foobar"),
            MediaUri::new("", "cid:foobax"),
        ],
    }];

    let mut seen = Vec::new();
    let submission = process(&form(vec![hidden]), &blobs, |_, _, handles| {
        seen = handles[0].info().media[0].iter().map(|m| m.data.clone()).collect();
        Ok::<_, FormError>(())
    })
    .expect("process");

    assert_eq!(seen, vec![None, None, Some(b"hello".to_vec()), None]);
    assert_eq!(submission.fields, vec![submitted(&[])]);
}

#[test]
fn decoded_form_round_trips_through_processing() {
    let registry = ConnectionRegistry::new();
    xmpp_forms::register(&registry).expect("register forms");

    let xml = "<message xmlns='jabber:client' from='bot@shakespeare.lit'>\
        <x xmlns='jabber:x:data' type='form'>\
          <title>Bot Configuration</title>\
          <field type='fixed'><value>Section 1</value></field>\
          <field var='public' type='boolean' label='Public bot?'><required/></field>\
          <field var='botname' type='text-single' label='Name'><value>Bot</value></field>\
          <field var='features' type='list-multi'>\
            <option label='News'><value>news</value></option>\
            <option label='Search'><value>search</value></option>\
          </field>\
          <field var='captcha' type='text-single'>\
            <media xmlns='urn:xmpp:media-element'>\
              <uri type='image/png'>cid:sha1+abc@bob.xmpp.org</uri>\
            </media>\
          </field>\
        </x>\
      </message>\
      <data xmlns='urn:xmpp:bob' cid='sha1+abc@bob.xmpp.org' type='image/png'>aGVsbG8=</data>";
    let mut decoder = StreamDecoder::new(XmlTokenReader::from_str(xml), registry);

    let message = decoder.next_element().expect("message").into_payload().expect("payload");
    let xmpp_wire::Payload::Message(message) = message else {
        panic!("expected message");
    };
    let x = &message.extensions[0];
    let mut form = Form::default();
    xmpp_wire::Unmarshal::unmarshal(&mut form, x).expect("form");

    let blob = decoder
        .next_element()
        .expect("data")
        .into_payload()
        .expect("payload")
        .downcast::<BobData>()
        .expect("bob data");

    let submission = process(&form, &[*blob], |title, _, handles| {
        assert_eq!(title, "Bot Configuration");
        assert_eq!(handles.len(), 4);
        for handle in handles.iter_mut() {
            match handle {
                FieldHandle::Boolean(public) => {
                    assert!(public.info.required);
                    public.result = true;
                }
                FieldHandle::SingleText(text) if text.info.var == "botname" => {
                    text.result = text.default.clone().unwrap_or_default();
                }
                FieldHandle::SingleText(captcha) => {
                    let media = &captcha.info.media[0][0];
                    assert_eq!(media.data.as_deref(), Some(&b"hello"[..]));
                    captcha.result = "hello".into();
                }
                FieldHandle::MultiSelection(features) => features.selected = vec![1, 0],
                other => panic!("unexpected handle {}", other.kind()),
            }
        }
        Ok::<_, FormError>(())
    })
    .expect("process");

    assert_eq!(
        submission,
        Form::submission(vec![
            submitted(&["true"]),
            submitted(&["Bot"]),
            submitted(&["search", "news"]),
            submitted(&["hello"]),
        ])
    );
}

#[test]
fn registering_forms_twice_is_rejected() {
    let registry = ConnectionRegistry::new();
    xmpp_forms::register(&registry).expect("first");
    assert!(xmpp_forms::register(&registry).is_err());
}
