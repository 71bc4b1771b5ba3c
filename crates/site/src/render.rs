//! Hand-built HTML for the two pages. CMS key-text fields are escaped;
//! rich-text bodies arrive already rendered and are injected as-is.

use spacetraveling_feed::{detail::PostView, listing::Listing};
use spacetraveling_types::post::{PostDetail, PostSummary};
use spacetraveling_types::utils::escape_html;

fn header() -> &'static str {
    r#"<header class="header"><a href="/"><img src="/images/logo.svg" alt="logo"></a></header>"#
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\"><head><meta charset=\"utf-8\">\
         <title>{} | spacetraveling</title></head><body>{}<main class=\"container\">{}</main></body></html>",
        escape_html(title),
        header(),
        body
    )
}

fn summary_entry(post: &PostSummary) -> String {
    format!(
        r#"<a class="post" href="/post/{uid}"><h1>{title}</h1><h2>{subtitle}</h2><div class="info"><time>{date}</time><p>{author}</p></div></a>"#,
        uid = escape_html(&post.uid),
        title = escape_html(&post.title),
        subtitle = escape_html(&post.subtitle),
        date = escape_html(post.first_publication_date.as_deref().unwrap_or("")),
        author = escape_html(&post.author),
    )
}

pub fn home_page(listing: &Listing, pages: usize) -> String {
    let mut body = String::new();
    for post in listing.posts() {
        body.push_str(&summary_entry(post));
    }
    if listing.has_more() {
        body.push_str(&format!(
            r#"<a class="load-more" href="/?pages={}">Carregar mais posts</a>"#,
            pages + 1
        ));
    }
    layout("Início", &body)
}

fn detail_body(post: &PostDetail) -> String {
    let mut body = String::new();
    if let Some(url) = &post.banner_url {
        body.push_str(&format!(
            r#"<img class="banner" src="{}" alt="banner">"#,
            escape_html(url)
        ));
    }
    body.push_str(&format!("<h1>{}</h1>", escape_html(&post.title)));
    body.push_str(&format!(
        r#"<div class="info"><time>{}</time><p>{}</p><span>{} min</span></div>"#,
        escape_html(post.first_publication_date.as_deref().unwrap_or("")),
        escape_html(&post.author),
        post.reading_minutes
    ));
    for block in &post.content {
        body.push_str("<section>");
        if let Some(heading) = &block.heading {
            body.push_str(&format!("<h2>{}</h2>", escape_html(heading)));
        }
        body.push_str(&format!(r#"<div class="post-body">{}</div>"#, block.body_html));
        body.push_str("</section>");
    }
    layout(&post.title, &body)
}

pub fn post_page(view: &PostView) -> String {
    match view {
        PostView::Loading => layout("Carregando", "<p>Carregando...</p>"),
        PostView::Ready(post) => detail_body(post),
        PostView::NotFound => not_found_page(),
    }
}

pub fn not_found_page() -> String {
    layout("Post não encontrado", "<p>Post não encontrado.</p>")
}

pub fn error_page() -> String {
    layout(
        "Erro",
        "<p>Não foi possível carregar o conteúdo. Tente novamente mais tarde.</p>",
    )
}
