use leptos::prelude::*;
use permisos_core::PermissionRecord;

/// One row of the history list: category badge, date range, duration and
/// the optional note.
#[component]
pub fn PermissionItem(record: PermissionRecord) -> impl IntoView {
    let badge_class = format!("badge {}", record.emphasis().css_class());
    let range = format!("{} al {}", record.start_date, record.end_date);
    let days = record.day_label();
    let note = record.note().map(str::to_string);
    let category = record.category;

    view! {
        <div class="list-group-item">
            <div class="d-flex justify-content-between align-items-center">
                <div>
                    <span class=badge_class>{category}</span>
                    " "
                    <small class="text-muted">{range}</small>
                    <br />
                    <small>{days}</small>
                </div>
                <div>
                    {note.map(|n| view! { <small>{n}</small> })}
                </div>
            </div>
        </div>
    }
}
