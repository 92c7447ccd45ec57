//! HTML-рендер страниц. Шаблонизатора нет, страницы собираются строками;
//! все пользовательские данные проходят через `escape`.

pub mod admin;
pub mod booking;
pub mod events;

use std::fmt::Write;

use crate::routes::Page;
use crate::theme::ThemeContext;
use crate::validation::FieldErrors;

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

pub fn money(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

const NAV_LINKS: [(&str, &str); 2] = [("/", "Home"), ("/events", "Events")];

fn navbar(ctx: &ThemeContext, page: &Page, back: &str, is_admin: bool) -> String {
    let mut links = String::new();
    for (href, label) in NAV_LINKS {
        let active = if page.nav_section() == href { " active text-purple-500" } else { "" };
        let _ = write!(links, r#"<a class="nav-link{}" href="{}">{}</a>"#, active, href, label);
    }
    let admin_label = if is_admin { "Dashboard" } else { "Admin" };
    let _ = write!(
        links,
        r#"<a class="nav-link{}" href="/admin">{}</a>"#,
        if page.nav_section() == "/admin" { " active text-purple-500" } else { "" },
        admin_label
    );

    format!(
        r#"<nav class="{bg} {text}"><a class="brand" href="/">TicketHub</a>{links}<form method="post" action="/theme"><input type="hidden" name="back" value="{back}"><button type="submit" aria-label="Toggle theme">{icon}</button></form></nav>"#,
        bg = ctx.pick("bg-white/98 border-gray-200/50", "bg-gray-950/98 border-gray-800/50"),
        text = ctx.pick("text-gray-700", "text-gray-300"),
        links = links,
        back = escape(back),
        icon = ctx.pick("Dark mode", "Light mode"),
    )
}

fn footer(ctx: &ThemeContext) -> String {
    format!(
        r#"<footer class="{}"><p>TicketHub - book seats for concerts, festivals and conferences.</p><p>support@tickethub.com</p></footer>"#,
        ctx.pick("bg-gray-50 text-gray-600", "bg-gray-950 text-gray-400")
    )
}

/// Общий каркас: навбар, контент, футер. `back` - куда вернуться после смены темы.
pub fn layout(ctx: &ThemeContext, page: &Page, back: &str, is_admin: bool, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en" data-theme="{theme}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title} | TicketHub</title></head><body class="min-h-screen flex flex-col {bg}">{nav}<main class="flex-grow">{body}</main>{footer}</body></html>"#,
        theme = ctx.theme(),
        title = escape(title),
        bg = ctx.page_bg(),
        nav = navbar(ctx, page, back, is_admin),
        body = body,
        footer = footer(ctx),
    )
}

pub fn error_banner(ctx: &ThemeContext, message: &str) -> String {
    format!(
        r#"<div class="alert error {}" role="alert">{}</div>"#,
        ctx.pick("bg-red-50 text-red-700", "bg-red-900/40 text-red-200"),
        escape(message)
    )
}

/// Текстовое поле формы с inline-ошибкой.
pub fn input(ctx: &ThemeContext, name: &str, label: &str, kind: &str, value: &str, errors: &FieldErrors) -> String {
    let (border, message) = match errors.get(name) {
        Some(message) => (
            " border-red-500",
            format!(r#"<p class="field-error text-red-500">{}</p>"#, escape(message)),
        ),
        None => ("", String::new()),
    };
    format!(
        r#"<label for="{name}">{label}</label><input id="{name}" name="{name}" type="{kind}" value="{value}" class="{input}{border}">{message}"#,
        name = name,
        label = escape(label),
        kind = kind,
        value = escape(value),
        input = ctx.input(),
        border = border,
        message = message,
    )
}
