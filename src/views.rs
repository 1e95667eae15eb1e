//! server rendered html for every page the handlers produce;
//! each view-model renders itself through `IntoResponse`

use std::fmt::Write;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::models::{Category, ContactDetail};
use crate::validate::{ContactPayload, FieldError};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// full listing, as handed over from the store (already ordered)
#[derive(Debug)]
pub struct ContactListing {
    pub contacts: Vec<ContactDetail>,
}

#[derive(Debug)]
pub struct ContactDetailsView {
    pub detail: ContactDetail,
}

#[derive(Debug)]
pub struct DeleteConfirmView {
    pub detail: ContactDetail,
}

/// shared create/edit form
#[derive(Debug)]
pub struct ContactFormView {
    pub is_edit: bool,
    pub contact: ContactPayload,
    pub errors: Vec<FieldError>,
    pub categories: Vec<Category>,
}

#[derive(Debug)]
pub struct NotFoundView;

#[derive(Debug)]
pub struct ErrorView;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{} - Address Book</title></head>\n\
         <body>\n\
         <nav><a href=\"/\">Address Book</a> | <a href=\"/Contacts/Create\">Add Contact</a></nav>\n\
         <main>\n{}</main>\n\
         </body>\n\
         </html>\n",
        escape(title),
        body
    )
}

// definition list shared by details and delete confirmation
fn contact_summary(detail: &ContactDetail) -> String {
    let c = &detail.contact;
    format!(
        "<dl>\n\
         <dt>First Name</dt><dd>{}</dd>\n\
         <dt>Last Name</dt><dd>{}</dd>\n\
         <dt>Nickname</dt><dd>{}</dd>\n\
         <dt>Phone Number</dt><dd>{}</dd>\n\
         <dt>Category</dt><dd>{}</dd>\n\
         <dt>Date Created</dt><dd>{}</dd>\n\
         </dl>\n",
        escape(&c.first_name),
        escape(&c.last_name),
        escape(c.nickname.as_deref().unwrap_or("")),
        escape(&c.phone_number),
        escape(&detail.category.name),
        c.date_created.format(DATE_FORMAT)
    )
}

impl ContactListing {
    pub fn render(&self) -> String {
        let mut body = String::from("<h1>Contacts</h1>\n");

        if self.contacts.is_empty() {
            body.push_str("<p>No contacts yet.</p>\n");
            return layout("Contacts", &body);
        }

        body.push_str(
            "<table>\n<thead><tr><th>Name</th><th>Phone Number</th>\
             <th>Category</th><th></th></tr></thead>\n<tbody>\n",
        );
        for detail in &self.contacts {
            let c = &detail.contact;
            let _ = writeln!(
                body,
                "<tr><td><a href=\"/Contacts/Details/{id}\">{name}</a></td>\
                 <td>{phone}</td><td>{category}</td>\
                 <td><a href=\"/Contacts/Edit/{id}\">Edit</a> \
                 <a href=\"/Contacts/Delete/{id}\">Delete</a></td></tr>",
                id = c.contact_id,
                name = escape(&c.full_name()),
                phone = escape(&c.phone_number),
                category = escape(&detail.category.name),
            );
        }
        body.push_str("</tbody>\n</table>\n");

        layout("Contacts", &body)
    }
}

impl ContactDetailsView {
    pub fn render(&self) -> String {
        let c = &self.detail.contact;
        let body = format!(
            "<h1>{}</h1>\n{}\
             <p><a href=\"/Contacts/Edit/{id}\">Edit</a> | \
             <a href=\"/Contacts/Delete/{id}\">Delete</a> | \
             <a href=\"/\">Back to list</a></p>\n",
            escape(&c.full_name()),
            contact_summary(&self.detail),
            id = c.contact_id,
        );

        layout(&c.full_name(), &body)
    }
}

impl DeleteConfirmView {
    pub fn render(&self) -> String {
        let c = &self.detail.contact;
        let body = format!(
            "<h1>Delete {}?</h1>\n\
             <p>Are you sure you want to delete this contact?</p>\n{}\
             <form method=\"post\" action=\"/Contacts/Delete/{id}\">\n\
             <button type=\"submit\">Delete</button> \
             <a href=\"/\">Cancel</a>\n\
             </form>\n",
            escape(&c.full_name()),
            contact_summary(&self.detail),
            id = c.contact_id,
        );

        layout("Delete Contact", &body)
    }
}

impl ContactFormView {
    fn messages_for(&self, field: &str) -> String {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| format!("<span class=\"field-error\">{}</span>", escape(&e.message)))
            .collect()
    }

    fn text_input(&self, field: &str, label: &str, value: &str) -> String {
        format!(
            "<p><label for=\"{f}\">{label}</label> \
             <input type=\"text\" id=\"{f}\" name=\"{f}\" value=\"{v}\"> {errs}</p>\n",
            f = field,
            label = label,
            v = escape(value),
            errs = self.messages_for(field),
        )
    }

    pub fn render(&self) -> String {
        let (title, action) = match (self.is_edit, self.contact.id()) {
            (true, Some(id)) => ("Edit Contact".to_string(), format!("/Contacts/Edit/{}", id)),
            _ => ("Add Contact".to_string(), "/Contacts/Create".to_string()),
        };

        let mut body = format!("<h1>{}</h1>\n", title);

        if !self.errors.is_empty() {
            body.push_str("<ul class=\"validation-summary\">\n");
            for e in &self.errors {
                let _ = writeln!(body, "<li>{}</li>", escape(&e.message));
            }
            body.push_str("</ul>\n");
        }

        let _ = writeln!(body, "<form method=\"post\" action=\"{}\">", action);
        if self.is_edit {
            let _ = writeln!(
                body,
                "<input type=\"hidden\" name=\"ContactId\" value=\"{}\">",
                escape(self.contact.contact_id.as_deref().unwrap_or(""))
            );
        }

        body.push_str(&self.text_input("FirstName", "First Name", &self.contact.first_name));
        body.push_str(&self.text_input("LastName", "Last Name", &self.contact.last_name));
        body.push_str(&self.text_input(
            "Nickname",
            "Nickname",
            self.contact.nickname.as_deref().unwrap_or(""),
        ));
        body.push_str(&self.text_input("PhoneNumber", "Phone Number", &self.contact.phone_number));

        let selected = self.contact.category_id.as_deref().map(str::trim);
        body.push_str("<p><label for=\"CategoryId\">Category</label> <select id=\"CategoryId\" name=\"CategoryId\">\n");
        for category in &self.categories {
            let id = category.category_id.to_string();
            let _ = writeln!(
                body,
                "<option value=\"{}\"{}>{}</option>",
                id,
                if selected == Some(id.as_str()) { " selected" } else { "" },
                escape(&category.name)
            );
        }
        let _ = writeln!(body, "</select> {}</p>", self.messages_for("CategoryId"));

        body.push_str(
            "<p><button type=\"submit\">Save</button> <a href=\"/\">Cancel</a></p>\n</form>\n",
        );

        layout(&title, &body)
    }
}

impl IntoResponse for ContactListing {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

impl IntoResponse for ContactDetailsView {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

impl IntoResponse for DeleteConfirmView {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

impl IntoResponse for ContactFormView {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

impl IntoResponse for NotFoundView {
    fn into_response(self) -> Response {
        let body = "<h1>Not Found</h1>\n<p>The contact you asked for does not exist.</p>\n\
                    <p><a href=\"/\">Back to list</a></p>\n";
        (StatusCode::NOT_FOUND, Html(layout("Not Found", body))).into_response()
    }
}

impl IntoResponse for ErrorView {
    fn into_response(self) -> Response {
        let body = "<h1>Error.</h1>\n<p>An error occurred while processing your request.</p>\n";
        (StatusCode::INTERNAL_SERVER_ERROR, Html(layout("Error", body))).into_response()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use chrono::Utc;
    use crate::models::Contact;

    fn detail() -> ContactDetail
    {
        ContactDetail {
            contact: Contact {
                contact_id: 9,
                first_name: "<b>Eve</b>".to_string(),
                last_name: "O'Neil".to_string(),
                nickname: None,
                phone_number: "555-0101".to_string(),
                category_id: 3,
                date_created: Utc::now(),
            },
            category: Category { category_id: 3, name: "Work".to_string() },
        }
    }

    #[test]
    fn escape_works()
    {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn listing_escapes_user_text()
    {
        let html = ContactListing { contacts: vec![detail()] }.render();

        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt; O&#39;Neil"));
        assert!(!html.contains("<b>Eve</b>"));
        assert!(html.contains("/Contacts/Details/9"));
    }

    #[test]
    fn form_shows_field_errors_and_selection()
    {
        let view = ContactFormView {
            is_edit: true,
            contact: ContactPayload {
                contact_id: Some("9".to_string()),
                category_id: Some("2".to_string()),
                ..Default::default()
            },
            errors: vec![FieldError {
                field: "FirstName",
                message: "First name required.".to_string(),
            }],
            categories: vec![
                Category { category_id: 1, name: "Family".to_string() },
                Category { category_id: 2, name: "Friend".to_string() },
            ],
        };
        let html = view.render();

        assert!(html.contains("action=\"/Contacts/Edit/9\""));
        assert!(html.contains("name=\"ContactId\" value=\"9\""));
        assert!(html.contains("<span class=\"field-error\">First name required.</span>"));
        assert!(html.contains("<option value=\"2\" selected>Friend</option>"));
        assert!(html.contains("<option value=\"1\">Family</option>"));
    }
}
