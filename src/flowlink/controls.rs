//! # Control Parameters
//!
//! Every [`ControlType`] carries its own parameter record. The document format
//! stores these as flat JSON objects whose keys are fixed per type, so each
//! record knows how to write itself into such an object and how to read itself
//! back out of one.
//!
//! Writing drops absent and empty-string fields. Reading is lenient: a field of
//! the wrong JSON type is dropped on its own instead of failing the whole
//! control, and numbers or booleans sent as strings are accepted.
//!
//! The `id` and `nodePath` keys belong to the [`Binding`](crate::model::Binding)
//! itself and are handled by the codec, not by these records.

use crate::model::ControlType;
use serde_json::{Map, Number, Value};

type Fields = Map<String, Value>;

trait ParamRecord: Sized {
    fn write(&self, out: &mut Fields);
    fn read(fields: &Fields) -> Self;
}

/// Controls that only carry a display label (seeder, image loader, canvas outputs).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelParams {
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptParams {
    pub label: Option<String>,
    pub default: Option<String>,
}

/// `url` names the option source and `key` the entry inside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropdownParams {
    pub url: Option<String>,
    pub key: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepperParams {
    pub label: Option<String>,
    pub min_value: Option<Number>,
    pub max_value: Option<Number>,
    pub step: Option<Number>,
    pub def_value: Option<Number>,
    pub precision: Option<Number>,
    pub scale_factor: Option<Number>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputParams {
    pub label: Option<String>,
    pub def_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToggleParams {
    pub label: Option<String>,
    pub default_value: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionParams {
    pub default_width: Option<Number>,
    pub default_height: Option<Number>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataParams {
    pub name: Option<String>,
    pub data_path: Option<String>,
}

impl ParamRecord for LabelParams {
    fn write(&self, out: &mut Fields) {
        put_text(out, "label", &self.label);
    }

    fn read(fields: &Fields) -> Self {
        Self {
            label: text(fields, "label"),
        }
    }
}

impl ParamRecord for PromptParams {
    fn write(&self, out: &mut Fields) {
        put_text(out, "label", &self.label);
        put_text(out, "default", &self.default);
    }

    fn read(fields: &Fields) -> Self {
        Self {
            label: text(fields, "label"),
            default: text(fields, "default"),
        }
    }
}

impl ParamRecord for DropdownParams {
    fn write(&self, out: &mut Fields) {
        put_text(out, "url", &self.url);
        put_text(out, "key", &self.key);
        put_text(out, "label", &self.label);
    }

    fn read(fields: &Fields) -> Self {
        Self {
            url: text(fields, "url"),
            key: text(fields, "key"),
            label: text(fields, "label"),
        }
    }
}

impl ParamRecord for StepperParams {
    fn write(&self, out: &mut Fields) {
        put_text(out, "label", &self.label);
        put_number(out, "minValue", &self.min_value);
        put_number(out, "maxValue", &self.max_value);
        put_number(out, "step", &self.step);
        put_number(out, "defValue", &self.def_value);
        put_number(out, "precision", &self.precision);
        put_number(out, "scaleFactor", &self.scale_factor);
    }

    fn read(fields: &Fields) -> Self {
        Self {
            label: text(fields, "label"),
            min_value: number(fields, "minValue"),
            max_value: number(fields, "maxValue"),
            step: number(fields, "step"),
            def_value: number(fields, "defValue"),
            precision: number(fields, "precision"),
            scale_factor: number(fields, "scaleFactor"),
        }
    }
}

impl ParamRecord for InputParams {
    fn write(&self, out: &mut Fields) {
        put_text(out, "label", &self.label);
        put_text(out, "defValue", &self.def_value);
    }

    fn read(fields: &Fields) -> Self {
        Self {
            label: text(fields, "label"),
            def_value: text(fields, "defValue"),
        }
    }
}

impl ParamRecord for ToggleParams {
    fn write(&self, out: &mut Fields) {
        put_text(out, "label", &self.label);
        if let Some(value) = self.default_value {
            out.insert("defaultValue".to_string(), Value::Bool(value));
        }
    }

    fn read(fields: &Fields) -> Self {
        Self {
            label: text(fields, "label"),
            default_value: boolean(fields, "defaultValue"),
        }
    }
}

impl ParamRecord for DimensionParams {
    fn write(&self, out: &mut Fields) {
        put_number(out, "defaultWidth", &self.default_width);
        put_number(out, "defaultHeight", &self.default_height);
    }

    fn read(fields: &Fields) -> Self {
        Self {
            default_width: number(fields, "defaultWidth"),
            default_height: number(fields, "defaultHeight"),
        }
    }
}

impl ParamRecord for DataParams {
    fn write(&self, out: &mut Fields) {
        put_text(out, "name", &self.name);
        put_text(out, "dataPath", &self.data_path);
    }

    fn read(fields: &Fields) -> Self {
        Self {
            name: text(fields, "name"),
            data_path: text(fields, "dataPath"),
        }
    }
}

/// Type-specific attributes of a binding, one variant per [`ControlType`].
#[derive(Debug, Clone, PartialEq)]
pub enum ControlParams {
    Prompt(PromptParams),
    Dropdown(DropdownParams),
    Stepper(StepperParams),
    Input(InputParams),
    Toggle(ToggleParams),
    Seeder(LabelParams),
    DimensionSelector(DimensionParams),
    ImageLoader(LabelParams),
    CanvasOutput(LabelParams),
    CanvasLoadedImage(LabelParams),
    CanvasAlphaOutput(LabelParams),
    CanvasSelectedMaskOutput(LabelParams),
    CanvasCroppedMaskOutput(LabelParams),
    CanvasCroppedImageOutput(LabelParams),
    CanvasCroppedAlphaOnImageOutput(LabelParams),
    DataComponent(DataParams),
}

impl ControlParams {
    /// A record of the given type with every field unset.
    pub fn empty(ty: ControlType) -> Self {
        Self::read_fields(ty, &Fields::new())
    }

    /// A record pre-filled with the values a fresh control starts from.
    pub fn with_defaults(ty: ControlType) -> Self {
        match ty {
            ControlType::Stepper => ControlParams::Stepper(StepperParams {
                label: None,
                min_value: Number::from_f64(0.1),
                max_value: Some(Number::from(100)),
                step: Number::from_f64(0.1),
                def_value: Some(Number::from(6)),
                precision: Some(Number::from(1)),
                scale_factor: Some(Number::from(10)),
            }),
            ControlType::Toggle => ControlParams::Toggle(ToggleParams {
                label: None,
                default_value: Some(true),
            }),
            other => Self::empty(other),
        }
    }

    pub fn control_type(&self) -> ControlType {
        match self {
            ControlParams::Prompt(_) => ControlType::Prompt,
            ControlParams::Dropdown(_) => ControlType::Dropdown,
            ControlParams::Stepper(_) => ControlType::Stepper,
            ControlParams::Input(_) => ControlType::Input,
            ControlParams::Toggle(_) => ControlType::Toggle,
            ControlParams::Seeder(_) => ControlType::Seeder,
            ControlParams::DimensionSelector(_) => ControlType::DimensionSelector,
            ControlParams::ImageLoader(_) => ControlType::ImageLoader,
            ControlParams::CanvasOutput(_) => ControlType::CanvasOutput,
            ControlParams::CanvasLoadedImage(_) => ControlType::CanvasLoadedImage,
            ControlParams::CanvasAlphaOutput(_) => ControlType::CanvasAlphaOutput,
            ControlParams::CanvasSelectedMaskOutput(_) => ControlType::CanvasSelectedMaskOutput,
            ControlParams::CanvasCroppedMaskOutput(_) => ControlType::CanvasCroppedMaskOutput,
            ControlParams::CanvasCroppedImageOutput(_) => ControlType::CanvasCroppedImageOutput,
            ControlParams::CanvasCroppedAlphaOnImageOutput(_) => {
                ControlType::CanvasCroppedAlphaOnImageOutput
            }
            ControlParams::DataComponent(_) => ControlType::DataComponent,
        }
    }

    pub fn label(&self) -> Option<&str> {
        let label = match self {
            ControlParams::Prompt(p) => &p.label,
            ControlParams::Dropdown(p) => &p.label,
            ControlParams::Stepper(p) => &p.label,
            ControlParams::Input(p) => &p.label,
            ControlParams::Toggle(p) => &p.label,
            ControlParams::Seeder(p)
            | ControlParams::ImageLoader(p)
            | ControlParams::CanvasOutput(p)
            | ControlParams::CanvasLoadedImage(p)
            | ControlParams::CanvasAlphaOutput(p)
            | ControlParams::CanvasSelectedMaskOutput(p)
            | ControlParams::CanvasCroppedMaskOutput(p)
            | ControlParams::CanvasCroppedImageOutput(p)
            | ControlParams::CanvasCroppedAlphaOnImageOutput(p) => &p.label,
            ControlParams::DimensionSelector(_) => return None,
            ControlParams::DataComponent(p) => &p.name,
        };
        label.as_deref().filter(|l| !l.is_empty())
    }

    /// Writes the non-empty fields of this record into `out`, in schema order.
    pub fn write_fields(&self, out: &mut Map<String, Value>) {
        match self {
            ControlParams::Prompt(p) => p.write(out),
            ControlParams::Dropdown(p) => p.write(out),
            ControlParams::Stepper(p) => p.write(out),
            ControlParams::Input(p) => p.write(out),
            ControlParams::Toggle(p) => p.write(out),
            ControlParams::Seeder(p)
            | ControlParams::ImageLoader(p)
            | ControlParams::CanvasOutput(p)
            | ControlParams::CanvasLoadedImage(p)
            | ControlParams::CanvasAlphaOutput(p)
            | ControlParams::CanvasSelectedMaskOutput(p)
            | ControlParams::CanvasCroppedMaskOutput(p)
            | ControlParams::CanvasCroppedImageOutput(p)
            | ControlParams::CanvasCroppedAlphaOnImageOutput(p) => p.write(out),
            ControlParams::DimensionSelector(p) => p.write(out),
            ControlParams::DataComponent(p) => p.write(out),
        }
    }

    /// Reads a record of type `ty` from a flat field map, ignoring keys the
    /// type does not define.
    pub fn read_fields(ty: ControlType, fields: &Map<String, Value>) -> Self {
        match ty {
            ControlType::Prompt => ControlParams::Prompt(PromptParams::read(fields)),
            ControlType::Dropdown => ControlParams::Dropdown(DropdownParams::read(fields)),
            ControlType::Stepper => ControlParams::Stepper(StepperParams::read(fields)),
            ControlType::Input => ControlParams::Input(InputParams::read(fields)),
            ControlType::Toggle => ControlParams::Toggle(ToggleParams::read(fields)),
            ControlType::Seeder => ControlParams::Seeder(LabelParams::read(fields)),
            ControlType::DimensionSelector => {
                ControlParams::DimensionSelector(DimensionParams::read(fields))
            }
            ControlType::ImageLoader => ControlParams::ImageLoader(LabelParams::read(fields)),
            ControlType::CanvasOutput => ControlParams::CanvasOutput(LabelParams::read(fields)),
            ControlType::CanvasLoadedImage => {
                ControlParams::CanvasLoadedImage(LabelParams::read(fields))
            }
            ControlType::CanvasAlphaOutput => {
                ControlParams::CanvasAlphaOutput(LabelParams::read(fields))
            }
            ControlType::CanvasSelectedMaskOutput => {
                ControlParams::CanvasSelectedMaskOutput(LabelParams::read(fields))
            }
            ControlType::CanvasCroppedMaskOutput => {
                ControlParams::CanvasCroppedMaskOutput(LabelParams::read(fields))
            }
            ControlType::CanvasCroppedImageOutput => {
                ControlParams::CanvasCroppedImageOutput(LabelParams::read(fields))
            }
            ControlType::CanvasCroppedAlphaOnImageOutput => {
                ControlParams::CanvasCroppedAlphaOnImageOutput(LabelParams::read(fields))
            }
            ControlType::DataComponent => ControlParams::DataComponent(DataParams::read(fields)),
        }
    }

    /// Overlays `fields` onto this record. Keys set to `null` or `""` clear
    /// the field; unknown keys are ignored.
    pub fn merge(&mut self, fields: &Map<String, Value>) {
        let mut current = Map::new();
        self.write_fields(&mut current);
        for (key, value) in fields {
            current.insert(key.clone(), value.clone());
        }
        *self = Self::read_fields(self.control_type(), &current);
    }

    /// Re-reads this record as another control type, keeping the fields both share.
    pub fn convert(&self, ty: ControlType) -> Self {
        if ty == self.control_type() {
            return self.clone();
        }
        let mut current = Map::new();
        self.write_fields(&mut current);
        let mut converted = Self::with_defaults(ty);
        converted.merge(&current);
        converted
    }

    /// Fills in a dropdown's option source from the node it is bound to.
    pub fn enrich_dropdown(&mut self, input_name: &str, class_type: &str) {
        if let ControlParams::Dropdown(p) = self {
            if p.key.as_deref().is_none_or(str::is_empty) {
                p.key = Some(input_name.to_string());
            }
            if p.url.as_deref().is_none_or(str::is_empty) {
                p.url = Some(class_type.to_string());
            }
        }
    }
}

fn put_text(out: &mut Fields, key: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        out.insert(key.to_string(), Value::String(value.to_string()));
    }
}

fn put_number(out: &mut Fields, key: &str, value: &Option<Number>) {
    if let Some(value) = value {
        out.insert(key.to_string(), Value::Number(value.clone()));
    }
}

fn text(fields: &Fields, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn number(fields: &Fields, key: &str) -> Option<Number> {
    match fields.get(key)? {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn boolean(fields: &Fields, key: &str) -> Option<bool> {
    match fields.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn writes_stepper_fields_in_schema_order() {
        let params = ControlParams::with_defaults(ControlType::Stepper);
        let mut out = Map::new();
        params.write_fields(&mut out);

        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "minValue",
                "maxValue",
                "step",
                "defValue",
                "precision",
                "scaleFactor"
            ]
        );
        assert_eq!(out["maxValue"], json!(100));
        assert_eq!(out["step"], json!(0.1));
    }

    #[test]
    fn drops_empty_strings_when_writing() {
        let params = ControlParams::Prompt(PromptParams {
            label: Some(String::new()),
            default: Some("a cat".into()),
        });
        let mut out = Map::new();
        params.write_fields(&mut out);
        assert_eq!(Value::Object(out), json!({"default": "a cat"}));
    }

    #[test]
    fn reads_leniently() {
        let params = ControlParams::read_fields(
            ControlType::Stepper,
            &fields(json!({
                "label": "CFG",
                "minValue": "1.5",
                "maxValue": [1, 2],
                "unknown": true
            })),
        );
        match params {
            ControlParams::Stepper(p) => {
                assert_eq!(p.label.as_deref(), Some("CFG"));
                assert_eq!(p.min_value, "1.5".parse().ok());
                assert_eq!(p.max_value, None);
            }
            other => panic!("unexpected params: {:?}", other),
        }

        let toggle =
            ControlParams::read_fields(ControlType::Toggle, &fields(json!({"defaultValue": "false"})));
        assert_eq!(
            toggle,
            ControlParams::Toggle(ToggleParams {
                label: None,
                default_value: Some(false)
            })
        );
    }

    #[test]
    fn merge_overlays_and_clears() {
        let mut params = ControlParams::with_defaults(ControlType::Stepper);
        params.merge(&fields(json!({"label": "Steps", "step": 1, "precision": null})));
        match &params {
            ControlParams::Stepper(p) => {
                assert_eq!(p.label.as_deref(), Some("Steps"));
                assert_eq!(p.step, Some(Number::from(1)));
                assert_eq!(p.precision, None);
                assert_eq!(p.max_value, Some(Number::from(100)));
            }
            other => panic!("unexpected params: {:?}", other),
        }
    }

    #[test]
    fn convert_keeps_shared_label() {
        let mut params = ControlParams::empty(ControlType::Seeder);
        params.merge(&fields(json!({"label": "Seed"})));
        let converted = params.convert(ControlType::Stepper);
        assert_eq!(converted.control_type(), ControlType::Stepper);
        assert_eq!(converted.label(), Some("Seed"));
    }

    #[test]
    fn dropdown_enrichment_fills_only_missing_fields() {
        let mut params = ControlParams::empty(ControlType::Dropdown);
        params.enrich_dropdown("ckpt_name", "CheckpointLoaderSimple");
        assert_eq!(
            params,
            ControlParams::Dropdown(DropdownParams {
                url: Some("CheckpointLoaderSimple".into()),
                key: Some("ckpt_name".into()),
                label: None,
            })
        );

        let mut custom = ControlParams::Dropdown(DropdownParams {
            url: Some("models".into()),
            key: None,
            label: None,
        });
        custom.enrich_dropdown("sampler_name", "KSampler");
        match custom {
            ControlParams::Dropdown(p) => {
                assert_eq!(p.url.as_deref(), Some("models"));
                assert_eq!(p.key.as_deref(), Some("sampler_name"));
            }
            other => panic!("unexpected params: {:?}", other),
        }
    }

    #[test]
    fn data_component_label_is_its_name() {
        let params =
            ControlParams::read_fields(ControlType::DataComponent, &fields(json!({"name": "Out"})));
        assert_eq!(params.label(), Some("Out"));
        assert_eq!(ControlParams::empty(ControlType::DimensionSelector).label(), None);
    }
}
