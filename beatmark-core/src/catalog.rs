/// One `<option>` of a catalog selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub const WAV_PLACEHOLDER: &str = "-- 請選擇 --";
pub const SCENE_PLACEHOLDER: &str = "-- 請選擇 scene --";
pub const LOAD_FAILED: &str = "載入失敗";

/// Which catalog list a load belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogKind {
    WavFiles,
    Scenes,
}

impl CatalogKind {
    pub fn placeholder(self) -> &'static str {
        match self {
            CatalogKind::WavFiles => WAV_PLACEHOLDER,
            CatalogKind::Scenes => SCENE_PLACEHOLDER,
        }
    }
}

/// Render a selector's options from a load result: a placeholder followed by
/// one option per name, or a single failure option. The option whose value
/// equals `selected` is marked; with nothing matching, the placeholder is.
pub fn render_options(
    loaded: &Result<Vec<String>, String>,
    placeholder: &str,
    selected: &str,
) -> Vec<SelectOption> {
    let names = match loaded {
        Ok(names) => names,
        Err(_) => {
            return vec![SelectOption {
                value: String::new(),
                label: LOAD_FAILED.to_string(),
                selected: true,
            }];
        }
    };

    let matched = !selected.is_empty() && names.iter().any(|n| n == selected);
    let mut options = Vec::with_capacity(names.len() + 1);
    options.push(SelectOption {
        value: String::new(),
        label: placeholder.to_string(),
        selected: !matched,
    });
    options.extend(names.iter().map(|name| SelectOption {
        value: name.clone(),
        label: name.clone(),
        selected: matched && name == selected,
    }));
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_then_names() {
        let opts = render_options(&Ok(vec!["a.wav".into(), "b.wav".into()]), WAV_PLACEHOLDER, "");
        assert_eq!(opts.len(), 3);
        assert_eq!(opts[0].value, "");
        assert_eq!(opts[0].label, WAV_PLACEHOLDER);
        assert!(opts[0].selected);
        assert_eq!(opts[2].value, "b.wav");
        assert_eq!(opts[2].label, "b.wav");
    }

    #[test]
    fn marks_current_selection() {
        let opts = render_options(&Ok(vec!["1-1".into(), "1-2".into()]), SCENE_PLACEHOLDER, "1-2");
        let selected: Vec<_> =
            opts.iter().filter(|o| o.selected).map(|o| o.value.as_str()).collect();
        assert_eq!(selected, vec!["1-2"]);
    }

    #[test]
    fn failure_is_single_empty_option() {
        let opts = render_options(&Err("boom".into()), SCENE_PLACEHOLDER, "1-1");
        assert_eq!(opts.len(), 1);
        assert_eq!(opts[0].value, "");
        assert_eq!(opts[0].label, LOAD_FAILED);
    }

    #[test]
    fn empty_list_is_placeholder_only() {
        let opts = render_options(&Ok(Vec::new()), SCENE_PLACEHOLDER, "");
        assert_eq!(opts.len(), 1);
        assert_eq!(opts[0].label, SCENE_PLACEHOLDER);
    }
}
