use leptos::prelude::*;

use crate::markdown::markdown_to_html;
use crate::model::book::ChatRole;
use crate::view_model::LibraryVm;

/// Floating "Ask the Librarian" panel.
#[component]
pub fn ChatWidget() -> impl IntoView {
    let vm = expect_context::<LibraryVm>();
    let input = RwSignal::new(String::new());

    let open = Signal::derive(move || vm.chat.with(|c| c.is_open()));
    let busy = Signal::derive(move || vm.chat.with(|c| c.is_busy()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let msg = input.get();
        if !msg.trim().is_empty() && !busy.get_untracked() {
            vm.send_chat(msg);
            input.set(String::new());
        }
    };

    view! {
        <div class="librarian-chat">
            <Show when=move || open.get()>
                <div class="chat-panel">
                    <div class="chat-header">
                        <strong>"Eleanor"</strong>
                        <span>"Head Librarian"</span>
                    </div>
                    <div class="chat-messages">
                        {move || {
                            vm.chat.with(|c| c.messages().to_vec()).into_iter().map(|msg| {
                                match msg.role {
                                    ChatRole::User => view! {
                                        <div class="chat-message user">
                                            <div class="message-content">{msg.text}</div>
                                        </div>
                                    }.into_any(),
                                    ChatRole::Assistant => view! {
                                        <div class="chat-message assistant">
                                            <div class="message-content" inner_html=markdown_to_html(&msg.text)></div>
                                        </div>
                                    }.into_any(),
                                }
                            }).collect_view()
                        }}
                        {move || busy.get().then(|| view! {
                            <div class="chat-message assistant">
                                <div class="message-content">"Eleanor is thinking..."</div>
                            </div>
                        })}
                    </div>
                    <form class="chat-input" on:submit=on_submit>
                        <input
                            type="text"
                            placeholder="Ask for a recommendation..."
                            prop:value=move || input.get()
                            on:input=move |ev| input.set(event_target_value(&ev))
                        />
                        <button
                            type="submit"
                            disabled=move || busy.get() || input.with(|i| i.trim().is_empty())
                        >
                            "Send"
                        </button>
                    </form>
                </div>
            </Show>
            <button class="chat-toggle" on:click=move |_| vm.chat.update(|c| c.toggle())>
                {move || if open.get() { "Close" } else { "Ask the Librarian" }}
            </button>
        </div>
    }
}
