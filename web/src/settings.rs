use crate::theme::Theme;
use crate::utils::*;
use memoria_core::Difficulty;
use serde::{Deserialize, Serialize};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub difficulty: Difficulty,
}

impl StorageKey for Settings {
    const KEY: &'static str = "memoria:settings";
}

/// Board columns for each difficulty.
pub(crate) const fn board_columns(difficulty: Difficulty) -> u8 {
    use Difficulty::*;
    match difficulty {
        Four | Eight => 4,
        Six | Twelve => 6,
    }
}

fn selected_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    pub settings: Settings,
    pub theme: Theme,
    pub on_settings: Callback<Settings>,
    pub on_theme: Callback<Theme>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let SettingsProps {
        settings,
        theme,
        on_settings,
        on_theme,
    } = props;

    let on_difficulty_change = {
        let on_settings = on_settings.clone();
        Callback::from(move |e: Event| {
            let value = selected_value(&e);
            match value.parse::<u8>().map(Difficulty::from_pair_count) {
                Ok(Ok(difficulty)) => on_settings.emit(Settings { difficulty }),
                _ => log::warn!("ignoring difficulty {:?}", value),
            }
        })
    };

    let on_theme_change = {
        let on_theme = on_theme.clone();
        Callback::from(move |e: Event| {
            let value = selected_value(&e);
            match Theme::from_value(&value) {
                Some(theme) => on_theme.emit(theme),
                None => log::warn!("ignoring theme {:?}", value),
            }
        })
    };

    html! {
        <fieldset class="settings">
            <label>
                {"Difficulty "}
                <select id="difficulty" onchange={on_difficulty_change}>
                    {
                        for Difficulty::ALL.into_iter().map(|difficulty| {
                            let pairs = difficulty.pair_count();
                            html! {
                                <option
                                    value={pairs.to_string()}
                                    selected={difficulty == settings.difficulty}
                                >
                                    {format!("{} pairs", pairs)}
                                </option>
                            }
                        })
                    }
                </select>
            </label>
            <label>
                {"Theme "}
                <select id="theme" onchange={on_theme_change}>
                    {
                        for Theme::ALL.into_iter().map(|option| html! {
                            <option value={option.value()} selected={option == *theme}>
                                {option.label()}
                            </option>
                        })
                    }
                </select>
            </label>
        </fieldset>
    }
}
