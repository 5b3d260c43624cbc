//! Server-rendered HTML pages.
//!
//! Every user-supplied string goes through [`escape`] before it is written
//! into markup.

use std::fmt::Write;

use axum::http::StatusCode;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tasklist_core::flash::Flash;
use tasklist_core::tasks::{MAX_CATEGORY_LENGTH, MAX_TASK_LENGTH};
use tasklist_db::models::task::Task;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:42rem;margin:2rem auto;padding:0 1rem}\
ul{list-style:none;padding:0}li{display:flex;gap:.5rem;align-items:center;padding:.25rem 0}\
.done .text{text-decoration:line-through;color:#888}\
.category{font-size:.8rem;background:#eee;border-radius:.25rem;padding:0 .4rem}\
.created{font-size:.75rem;color:#999}\
.flash{padding:.5rem;border-radius:.25rem}\
.flash-success{background:#e6f4ea}.flash-error{background:#fce8e6}\
form.inline{display:inline;margin:0}";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Everything except RFC 3986 unreserved characters is escaped in query values.
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a query-string value.
fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE_ENCODE_SET).to_string()
}

fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        escape(title)
    );
    if let Some(flash) = flash {
        let _ = writeln!(
            html,
            "<p class=\"flash flash-{}\" role=\"status\">{}</p>",
            flash.level.as_str(),
            escape(&flash.message)
        );
    }
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

fn category_datalist(categories: &[String]) -> String {
    let mut html = String::from("<datalist id=\"categories\">");
    for category in categories {
        let _ = write!(html, "<option value=\"{}\">", escape(category));
    }
    html.push_str("</datalist>\n");
    html
}

/// The task list with add form and category filter.
pub fn index_page(
    tasks: &[Task],
    categories: &[String],
    selected: Option<&str>,
    flash: Option<&Flash>,
) -> String {
    let mut body = String::from("<h1>Tasks</h1>\n");

    // Filter
    body.push_str("<form method=\"get\" action=\"/\" class=\"filter\">\n");
    body.push_str("<label>Category <select name=\"category\" onchange=\"this.form.submit()\">");
    let _ = write!(
        body,
        "<option value=\"\"{}>All</option>",
        if selected.is_none() { " selected" } else { "" }
    );
    for category in categories {
        let is_selected = selected == Some(category.as_str());
        let _ = write!(
            body,
            "<option value=\"{0}\"{1}>{0}</option>",
            escape(category),
            if is_selected { " selected" } else { "" }
        );
    }
    body.push_str("</select></label>\n<noscript><button type=\"submit\">Filter</button></noscript>\n</form>\n");

    // Add
    let _ = write!(
        body,
        "<form method=\"post\" action=\"/add\" class=\"add\">\n\
         <input type=\"text\" name=\"task\" placeholder=\"New task\" maxlength=\"{MAX_TASK_LENGTH}\" required autofocus>\n\
         <input type=\"text\" name=\"category\" placeholder=\"Category (optional)\" maxlength=\"{MAX_CATEGORY_LENGTH}\" list=\"categories\" value=\"{}\">\n\
         <button type=\"submit\">Add</button>\n</form>\n",
        escape(selected.unwrap_or_default())
    );
    body.push_str(&category_datalist(categories));

    // List
    if tasks.is_empty() {
        body.push_str("<p class=\"empty\">No tasks yet.</p>\n");
    } else {
        body.push_str("<ul class=\"tasks\">\n");
        for task in tasks {
            body.push_str(&task_item(task));
        }
        body.push_str("</ul>\n");
    }

    if let Some(category) = selected {
        let _ = writeln!(
            body,
            "<p><a href=\"/\">Show all</a> (filtered by <a href=\"/?category={}\">{}</a>)</p>",
            encode_query_value(category),
            escape(category)
        );
    }

    layout("Tasks", flash, &body)
}

fn task_item(task: &Task) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<li id=\"task-{id}\" class=\"{class}\">\
         <form method=\"post\" action=\"/toggle/{id}\" class=\"inline\">\
         <button type=\"submit\" title=\"Toggle\">{mark}</button></form>\
         <span class=\"text\">{text}</span>",
        id = task.id,
        class = if task.completed { "done" } else { "open" },
        mark = if task.completed { "&#x2611;" } else { "&#x2610;" },
        text = escape(&task.task),
    );
    if let Some(category) = &task.category {
        let _ = write!(
            html,
            "<a class=\"category\" href=\"/?category={}\">{}</a>",
            encode_query_value(category),
            escape(category)
        );
    }
    let _ = write!(
        html,
        "<span class=\"created\">{created}</span>\
         <a href=\"/edit/{id}\">Edit</a>\
         <form method=\"post\" action=\"/delete/{id}\" class=\"inline\">\
         <button type=\"submit\">Delete</button></form></li>\n",
        created = task.created_at.format("%Y-%m-%d %H:%M"),
        id = task.id,
    );
    html
}

/// Edit form for a single task.
pub fn edit_page(task: &Task, categories: &[String], flash: Option<&Flash>) -> String {
    let mut body = String::from("<h1>Edit task</h1>\n");
    let _ = write!(
        body,
        "<form method=\"post\" action=\"/edit/{id}\" class=\"edit\">\n\
         <label>Task <input type=\"text\" name=\"task\" value=\"{text}\" maxlength=\"{MAX_TASK_LENGTH}\" required autofocus></label>\n\
         <label>Category <input type=\"text\" name=\"category\" value=\"{category}\" maxlength=\"{MAX_CATEGORY_LENGTH}\" list=\"categories\"></label>\n\
         <button type=\"submit\">Save</button>\n<a href=\"/\">Cancel</a>\n</form>\n",
        id = task.id,
        text = escape(&task.task),
        category = escape(task.category.as_deref().unwrap_or_default()),
    );
    body.push_str(&category_datalist(categories));
    let _ = writeln!(
        body,
        "<p class=\"created\">Created {}</p>",
        task.created_at.format("%Y-%m-%d %H:%M")
    );
    layout("Edit task", flash, &body)
}

/// Minimal error page with a sanitized message.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to tasks</a></p>\n",
        status.as_u16(),
        escape(message)
    );
    layout("Error", None, &body)
}
