//! Create/edit form shared by every admin resource.
//!
//! Field values are kept as strings (one signal per field) and converted into
//! a JSON payload only on submit, so the form works unchanged for any record
//! type that describes its fields.

use crate::components::ui::{
    BoundSelect, Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, CardTitle,
    Checkbox, ErrorBanner, Input, Label, Spinner, Textarea,
};
use leptos::prelude::*;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FieldKind {
    Text,
    LongText,
    Number,
    Url,
    DateTime,
    Checkbox,
    /// Comma-separated input sent as a string array.
    List,
    Choice(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

pub(crate) type FormValues = BTreeMap<String, String>;

/// Initial values: blanks for a create form, the record's values for edit.
pub(crate) fn prefill(fields: &[FormField], record: Option<&Value>) -> FormValues {
    fields
        .iter()
        .map(|f| {
            let value = record
                .and_then(|r| r.get(f.key))
                .map(|v| value_to_input(v, &f.kind))
                .unwrap_or_else(|| default_input(&f.kind));
            (f.key.to_string(), value)
        })
        .collect()
}

fn default_input(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Checkbox => "false".to_string(),
        FieldKind::Choice(options) => options.first().cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

fn value_to_input(value: &Value, kind: &FieldKind) -> String {
    match value {
        Value::Null => default_input(kind),
        Value::String(s) if *kind == FieldKind::DateTime => s.chars().take(16).collect(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        // Populated references carry their id under `_id`.
        Value::Object(map) => map
            .get("_id")
            .or_else(|| map.get("id"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        Value::Array(items) => items
            .iter()
            .map(|v| value_to_input(v, &FieldKind::Text))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn parse_field(field: &FormField, raw: &str) -> Result<Option<Value>, String> {
    let raw = raw.trim();
    if field.kind != FieldKind::Checkbox && raw.is_empty() {
        if field.required {
            return Err(format!("{} is required", field.label));
        }
        return Ok(None);
    }

    let value = match &field.kind {
        FieldKind::Text | FieldKind::LongText | FieldKind::DateTime => Value::String(raw.to_string()),
        FieldKind::Url => {
            if !(raw.starts_with("http://") || raw.starts_with("https://")) {
                return Err(format!("{} must be an http(s) URL", field.label));
            }
            Value::String(raw.to_string())
        }
        FieldKind::Number => {
            let n: f64 = raw
                .parse()
                .map_err(|_| format!("{} must be a number", field.label))?;
            if !n.is_finite() || n < 0.0 {
                return Err(format!("{} must be a non-negative number", field.label));
            }
            if n.fract() == 0.0 && n < 1e15 {
                Value::Number(Number::from(n as u64))
            } else {
                Number::from_f64(n)
                    .map(Value::Number)
                    .ok_or_else(|| format!("{} must be a number", field.label))?
            }
        }
        FieldKind::Checkbox => Value::Bool(raw == "true"),
        FieldKind::List => Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        ),
        FieldKind::Choice(options) => {
            if !options.iter().any(|o| o == raw) {
                return Err(format!("{} has an unknown value: {raw}", field.label));
            }
            Value::String(raw.to_string())
        }
    };
    Ok(Some(value))
}

/// Full payload for a create. Blank optional fields are omitted.
pub(crate) fn form_payload(fields: &[FormField], values: &FormValues) -> Result<Value, String> {
    let mut map = Map::new();
    for field in fields {
        let raw = values.get(field.key).map(String::as_str).unwrap_or_default();
        if let Some(v) = parse_field(field, raw)? {
            map.insert(field.key.to_string(), v);
        }
    }
    Ok(Value::Object(map))
}

/// Partial payload for an update: only fields whose input changed. A cleared
/// optional field is sent as `null`.
pub(crate) fn changed_payload(
    fields: &[FormField],
    original: &FormValues,
    values: &FormValues,
) -> Result<Value, String> {
    let mut map = Map::new();
    for field in fields {
        let raw = values.get(field.key).map(String::as_str).unwrap_or_default();
        let before = original.get(field.key).map(String::as_str).unwrap_or_default();
        if raw.trim() == before.trim() {
            continue;
        }
        let v = parse_field(field, raw)?.unwrap_or(Value::Null);
        map.insert(field.key.to_string(), v);
    }
    Ok(Value::Object(map))
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FormMode {
    Create,
    Edit { id: String, original: FormValues },
}

/// Card with one input per field. `on_submit` receives the current values;
/// the caller builds the payload and reports errors back through `error`.
#[component]
pub(crate) fn ResourceForm(
    #[prop(into)] title: String,
    fields: Vec<FormField>,
    initial: FormValues,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] saving: Signal<bool>,
    on_submit: Callback<FormValues>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let signals: Vec<(FormField, RwSignal<String>)> = fields
        .into_iter()
        .map(|f| {
            let v = initial.get(f.key).cloned().unwrap_or_default();
            (f, RwSignal::new(v))
        })
        .collect();
    let collected = StoredValue::new(
        signals
            .iter()
            .map(|(f, s)| (f.key.to_string(), *s))
            .collect::<Vec<_>>(),
    );

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let values: FormValues = collected.with_value(|fields| {
            fields
                .iter()
                .map(|(k, s)| (k.clone(), s.get_untracked()))
                .collect()
        });
        on_submit.run(values);
    };

    let inputs = signals
        .into_iter()
        .map(|(field, value)| {
            let id = format!("field-{}", field.key);
            let input = match field.kind.clone() {
                FieldKind::LongText => view! { <Textarea id=id.clone() bind_value=value /> }.into_any(),
                FieldKind::Checkbox => view! { <Checkbox id=id.clone() bind_value=value /> }.into_any(),
                FieldKind::Choice(options) => {
                    let options: Vec<(String, String)> =
                        options.into_iter().map(|o| (o.clone(), o)).collect();
                    view! { <BoundSelect id=id.clone() options=options bind_value=value /> }
                        .into_any()
                }
                FieldKind::Number => view! {
                    <Input id=id.clone() r#type="number" step="any" bind_value=value />
                }
                .into_any(),
                FieldKind::Url => view! {
                    <Input id=id.clone() r#type="url" placeholder="https://" bind_value=value />
                }
                .into_any(),
                FieldKind::DateTime => view! {
                    <Input id=id.clone() r#type="datetime-local" bind_value=value />
                }
                .into_any(),
                FieldKind::List => view! {
                    <Input id=id.clone() placeholder="comma, separated" bind_value=value />
                }
                .into_any(),
                FieldKind::Text => view! { <Input id=id.clone() bind_value=value /> }.into_any(),
            };
            view! {
                <div class="flex flex-col gap-1.5">
                    <Label html_for=id class="text-xs" required=field.required>{field.label}</Label>
                    {input}
                </div>
            }
        })
        .collect_view();

    view! {
        <Card class="gap-3 py-4">
            <CardHeader class="px-4">
                <CardTitle class="text-sm">{title}</CardTitle>
            </CardHeader>
            <CardContent class="px-4">
                <form class="grid gap-3 sm:grid-cols-2" on:submit=submit>
                    {inputs}
                    <div class="sm:col-span-2">
                        <ErrorBanner message=error />
                    </div>
                    <div class="flex items-center gap-2 sm:col-span-2">
                        <Button size=ButtonSize::Sm attr:r#type="submit" attr:disabled=move || saving.get()>
                            <Show when=move || saving.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            "Save"
                        </Button>
                        <Button
                            size=ButtonSize::Sm
                            variant=ButtonVariant::Ghost
                            attr:r#type="button"
                            on:click=move |_| on_cancel.run(())
                        >
                            "Cancel"
                        </Button>
                    </div>
                </form>
            </CardContent>
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("title", "Title", FieldKind::Text).required(),
            FormField::new("price", "Price", FieldKind::Number),
            FormField::new("isFree", "Free", FieldKind::Checkbox),
            FormField::new("tags", "Tags", FieldKind::List),
            FormField::new(
                "level",
                "Level",
                FieldKind::Choice(vec!["beginner".into(), "advanced".into()]),
            ),
            FormField::new("videoUrl", "Video URL", FieldKind::Url),
        ]
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_payload_converts_kinds_and_omits_blanks() {
        let v = values(&[
            ("title", " Intro to Rust "),
            ("price", "19.5"),
            ("isFree", "true"),
            ("tags", "rust, , systems"),
            ("level", "advanced"),
            ("videoUrl", ""),
        ]);
        let payload = form_payload(&fields(), &v).expect("valid form");
        assert_eq!(
            payload,
            json!({
                "title": "Intro to Rust",
                "price": 19.5,
                "isFree": true,
                "tags": ["rust", "systems"],
                "level": "advanced",
            })
        );
    }

    #[test]
    fn test_whole_numbers_stay_integers() {
        let v = values(&[("title", "t"), ("price", "200"), ("level", "beginner")]);
        let payload = form_payload(&fields(), &v).expect("valid form");
        assert_eq!(payload["price"], json!(200));
    }

    #[test]
    fn test_validation_messages() {
        let missing = form_payload(&fields(), &values(&[("level", "beginner")]));
        assert_eq!(missing, Err("Title is required".to_string()));

        let bad_number = form_payload(
            &fields(),
            &values(&[("title", "t"), ("price", "ten"), ("level", "beginner")]),
        );
        assert_eq!(bad_number, Err("Price must be a number".to_string()));

        let bad_choice = form_payload(&fields(), &values(&[("title", "t"), ("level", "expert")]));
        assert!(bad_choice.is_err());

        let bad_url = form_payload(
            &fields(),
            &values(&[("title", "t"), ("level", "beginner"), ("videoUrl", "ftp://x")]),
        );
        assert_eq!(bad_url, Err("Video URL must be an http(s) URL".to_string()));
    }

    #[test]
    fn test_prefill_from_record() {
        let record = json!({
            "_id": "c1",
            "title": "Intro",
            "price": 200.0,
            "isFree": true,
            "tags": ["a", "b"],
            "level": null,
            "category": {"_id": "cat1", "label": "Programming"},
        });
        let mut f = fields();
        f.push(FormField::new("category", "Category", FieldKind::Text));
        let v = prefill(&f, Some(&record));
        assert_eq!(v["title"], "Intro");
        assert_eq!(v["price"], "200");
        assert_eq!(v["isFree"], "true");
        assert_eq!(v["tags"], "a, b");
        assert_eq!(v["level"], "beginner");
        assert_eq!(v["category"], "cat1");
        assert_eq!(v["videoUrl"], "");
    }

    #[test]
    fn test_prefill_blank_form() {
        let v = prefill(&fields(), None);
        assert_eq!(v["title"], "");
        assert_eq!(v["isFree"], "false");
        assert_eq!(v["level"], "beginner");
    }

    #[test]
    fn test_changed_payload_sends_only_edits() {
        let record = json!({"title": "Intro", "price": 10, "level": "beginner"});
        let original = prefill(&fields(), Some(&record));
        let mut edited = original.clone();
        edited.insert("price".into(), "12".into());
        edited.insert("videoUrl".into(), "   ".into());

        let payload = changed_payload(&fields(), &original, &edited).expect("valid edit");
        assert_eq!(payload, json!({"price": 12}));

        let mut cleared = original.clone();
        cleared.insert("price".into(), String::new());
        let payload = changed_payload(&fields(), &original, &cleared).expect("valid edit");
        assert_eq!(payload, json!({"price": null}));
    }
}
