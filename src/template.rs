use crate::card::CardEmail;

/// Escapes the five HTML-significant characters so user text can be
/// interpolated into element content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

pub fn render(card: &CardEmail) -> String {
    let name = escape(&card.card_name);
    let vibe = escape(card.vibe.as_deref().unwrap_or_default());
    let body_text = escape(card.body_text.as_deref().unwrap_or_default());
    let image_url = escape(&card.card_image_url);
    let share = card
        .share_url
        .as_deref()
        .map(share_link)
        .unwrap_or_default();

    format!(
        r#"
<div style="font-family:Inter,Arial;background:#020617;color:#f1f5f9;padding:24px">
  <div style="max-width:520px;margin:0 auto;background:#0f172a;border:1px solid rgba(255,255,255,.08);border-radius:18px;overflow:hidden">
    <div style="padding:16px 18px;border-bottom:1px solid rgba(255,255,255,.08);letter-spacing:.25em;font-weight:900;font-size:11px;color:#cbd5e1">
      DREAM ORACLE
    </div>
    <div style="padding:18px">
      <div style="color:#9b0aa5;font-size:11px;letter-spacing:.25em;font-weight:900;text-transform:uppercase">Electric Dream</div>
      <div style="font-size:34px;font-weight:900;margin-top:8px">{name}</div>
      <div style="margin-top:8px;font-size:12px;color:#94a3b8">Frequenza: <b style="color:#e2e8f0">{vibe}</b></div>
      <div style="margin:14px 0;height:1px;background:rgba(255,255,255,.12)"></div>
      <img src="{image_url}" alt="{name}" style="width:100%;border-radius:14px;border:1px solid rgba(255,255,255,.15)">
      <p style="margin-top:14px;font-size:16px;line-height:1.55;color:#f8fafc;font-style:italic">“{body_text}”</p>
      {share}
    </div>
  </div>
</div>
"#
    )
}

fn share_link(url: &str) -> String {
    format!(
        r#"<p style="margin-top:14px"><a href="{}" style="color:#e2e8f0;text-decoration:underline">Apri la tua card</a></p>"#,
        escape(url)
    )
}
