// HTML presentation of the analysis form and its result

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

use crate::domain::profile::value_objects::{Gender, GENDER_PLACEHOLDER};

pub const TITLE: &str = "CrewAI Health, Nutrition, and Fitness Analysis";

pub const DESCRIPTION: &str = "Enter your age, gender, and whether you have any disease to receive \
                               personalized fitness, nutrition, and health strategies.";

pub const DISEASE_PLACEHOLDER: &str = "Enter disease or 'no' if none";

const CSS: &str = r#"
body {
    background-color: #f5f5f5;
    font-family: 'Roboto', sans-serif;
    color: #333333;
}
.container {
    background: #1b114a;
    border-radius: 8px;
    padding: 20px;
    box-shadow: 0 4px 10px rgba(0, 0, 0, 0.1);
    max-width: 800px;
    margin: auto;
}
h1, h3 {
    color: #ff6f00;
    text-align: center;
}
.description {
    color: #666666;
    text-align: center;
    margin-bottom: 20px;
}
label {
    font-weight: bold;
    margin-bottom: 10px;
    display: block;
    color: #ffffff;
}
input, select, textarea {
    width: calc(100% - 20px);
    padding: 10px;
    margin-bottom: 20px;
    border: 1px solid #dddddd;
    border-radius: 4px;
    font-size: 16px;
}
button {
    background-color: #ff6f00;
    color: white;
    padding: 10px 20px;
    border: none;
    border-radius: 4px;
    font-size: 16px;
    cursor: pointer;
}
button:hover {
    background-color: #ff8c00;
}
#output {
    margin-top: 20px;
    padding: 20px;
    border-radius: 8px;
    background-color: #1b114a;
    box-shadow: 0 2px 5px rgba(0, 0, 0, 0.1);
    font-size: 16px;
    line-height: 1.5;
    color: #ffffff;
}
#output h2 {
    font-size: 24px;
    margin-bottom: 10px;
    color: #ff6f00;
}
#output h3 {
    font-size: 20px;
    margin-bottom: 10px;
    color: #ff8c00;
}
#output p {
    margin-bottom: 10px;
}
#output .error {
    color: #ff8c8c;
}
"#;

/// Raw form values, echoed back into the page
#[derive(Debug, Clone, Default)]
pub struct FormValues<'a> {
    pub age: &'a str,
    pub gender: &'a str,
    pub disease: &'a str,
}

/// What goes into the output region
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    Result(&'a str),
    Error(&'a str),
}

/// Renders the full page: form plus an optional output region
pub fn render_page(values: &FormValues<'_>, outcome: Option<Outcome<'_>>) -> String {
    let output = match outcome {
        Some(Outcome::Result(text)) => {
            format!(r#"<div id="output">{}</div>"#, render_markdown(text))
        }
        Some(Outcome::Error(message)) => format!(
            r#"<div id="output"><p class="error">{}</p></div>"#,
            escape_html(message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{css}</style>
</head>
<body>
<div class="container">
<h1>{title}</h1>
<p class="description">{description}</p>
<form method="post" action="/analyze">
<label for="age">Age</label>
<input id="age" name="age" type="number" step="any" value="{age}">
<label for="gender">Gender</label>
<select id="gender" name="gender">{gender_options}</select>
<label for="disease">Disease</label>
<input id="disease" name="disease" type="text" placeholder="{placeholder}" value="{disease}">
<button type="submit">Submit</button>
</form>
{output}
</div>
</body>
</html>
"#,
        title = TITLE,
        css = CSS,
        description = DESCRIPTION,
        age = escape_html(values.age),
        gender_options = gender_options(values.gender),
        placeholder = escape_html(DISEASE_PLACEHOLDER),
        disease = escape_html(values.disease),
        output = output,
    )
}

fn gender_options(selected: &str) -> String {
    let selected = Gender::from_label(selected);

    Gender::CHOICES
        .iter()
        .map(|choice| {
            let marker = if Gender::from_label(choice) == selected {
                " selected"
            } else {
                ""
            };
            let value = if *choice == GENDER_PLACEHOLDER { "" } else { *choice };
            format!(r#"<option value="{}"{}>{}</option>"#, value, marker, choice)
        })
        .collect()
}

/// Renders model output as HTML
///
/// The output is treated as markdown. Raw HTML inside it is shown as
/// text, never passed through, and links or images pointing anywhere
/// but an absolute `http`, `https` or `mailto` URL are rewritten to `#`.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let lower = url.trim().to_ascii_lowercase();
    let allowed = ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme));

    if allowed {
        url
    } else {
        CowStr::Borrowed("#")
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
