use property_ledger_domain::evaluate_password;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PasswordStrengthMeterProps {
    pub password: String,
}

#[function_component(PasswordStrengthMeter)]
pub fn password_strength_meter(props: &PasswordStrengthMeterProps) -> Html {
    if props.password.is_empty() {
        return html! {};
    }

    let strength = evaluate_password(&props.password);
    let bar_style = format!("width: {}%", strength.percent());

    html! {
        <div class="password-strength">
            <div class="strength-track">
                <div class={classes!("strength-bar", strength.level.css_class())} style={bar_style}></div>
            </div>
            <span class="strength-label">{strength.level.label()}</span>
            {if !strength.suggestions.is_empty() {
                html! {
                    <ul class="strength-suggestions">
                        {for strength.suggestions.iter().map(|suggestion| html! { <li>{suggestion}</li> })}
                    </ul>
                }
            } else { html! {} }}
        </div>
    }
}

/// Password and confirmation inputs for the server-rendered registration
/// form. A weak password or a mismatch sets the browser's custom validity
/// so the surrounding form refuses to submit.
#[function_component(RegisterPasswordFields)]
pub fn register_password_fields() -> Html {
    let password = use_state(String::new);
    let confirmation = use_state(String::new);
    let password_ref = use_node_ref();
    let confirmation_ref = use_node_ref();

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_confirmation = {
        let confirmation = confirmation.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            confirmation.set(input.value());
        })
    };

    let mismatch = !confirmation.is_empty() && *password != *confirmation;

    {
        let password_ref = password_ref.clone();
        let confirmation_ref = confirmation_ref.clone();
        use_effect_with(((*password).clone(), mismatch), move |(password, mismatch)| {
            let strength = evaluate_password(password);
            if let Some(input) = password_ref.cast::<HtmlInputElement>() {
                let message = if password.is_empty() || strength.acceptable {
                    ""
                } else {
                    "Please choose a stronger password"
                };
                input.set_custom_validity(message);
            }
            if let Some(input) = confirmation_ref.cast::<HtmlInputElement>() {
                input.set_custom_validity(if *mismatch { "Passwords do not match" } else { "" });
            }
            || ()
        });
    }

    html! {
        <div class="password-fields">
            <div class="form-group">
                <label for="password">{"Password"}</label>
                <input
                    type="password"
                    id="password"
                    name="password"
                    autocomplete="new-password"
                    required=true
                    ref={password_ref}
                    value={(*password).clone()}
                    oninput={on_password}
                />
                <PasswordStrengthMeter password={(*password).clone()} />
            </div>
            <div class="form-group">
                <label for="confirm_password">{"Confirm password"}</label>
                <input
                    type="password"
                    id="confirm_password"
                    name="confirm_password"
                    autocomplete="new-password"
                    required=true
                    ref={confirmation_ref}
                    value={(*confirmation).clone()}
                    oninput={on_confirmation}
                />
                {if mismatch {
                    html! { <div class="field-error">{"Passwords do not match"}</div> }
                } else { html! {} }}
            </div>
        </div>
    }
}
