//! 渲染页面模板和页面内执行的脚本

use serde_json::Value as JsonValue;

use crate::error::AppResult;

/// 只包含一个容器和 mermaid 脚本的空白页面
pub fn page_html(mermaid_script_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<script src="{}"></script>
</head>
<body>
<div id="container"></div>
</body>
</html>
"#,
        mermaid_script_url
    )
}

/// 把图表定义放进容器、应用配置和 CSS、调用 mermaid 渲染
///
/// 返回 `{ error: string | null }`
pub fn render_script(
    definition: &str,
    mermaid_config: &JsonValue,
    css: Option<&str>,
    background_color: &str,
) -> AppResult<String> {
    Ok(format!(
        r#"
        (async () => {{
            for (let i = 0; i < 200 && !window.mermaid; i++) {{
                await new Promise(resolve => setTimeout(resolve, 50));
            }}
            if (!window.mermaid) {{
                return {{ error: 'mermaid script was not loaded' }};
            }}
            try {{
                document.body.style.background = {background};
                const container = document.getElementById('container');
                container.textContent = {definition};
                window.mermaid.initialize(Object.assign({{ startOnLoad: false }}, {config}));

                const css = {css};
                if (css) {{
                    const head = document.head || document.getElementsByTagName('head')[0];
                    const style = document.createElement('style');
                    style.type = 'text/css';
                    style.appendChild(document.createTextNode(css));
                    head.appendChild(style);
                }}

                await window.mermaid.run({{ nodes: [container] }});
                return {{ error: null }};
            }} catch (error) {{
                return {{ error: String((error && error.message) || error) }};
            }}
        }})()
        "#,
        background = serde_json::to_string(background_color)?,
        definition = serde_json::to_string(definition)?,
        config = serde_json::to_string(mermaid_config)?,
        css = serde_json::to_string(&css)?,
    ))
}

/// 读取容器中的 SVG 标记
pub const SVG_MARKUP_SCRIPT: &str = "document.getElementById('container').innerHTML";

/// 读取渲染出的 svg 的位置和尺寸
pub const SVG_BOUNDS_SCRIPT: &str = r#"
(() => {
    const svg = document.querySelector('#container svg');
    if (!svg) {
        return { found: false };
    }
    const rect = svg.getBoundingClientRect();
    return { found: true, x: rect.left, y: rect.top, width: rect.width, height: rect.height };
})()
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_html_includes_script_and_container() {
        let html = page_html("https://example.com/mermaid.js");
        assert!(html.contains(r#"<script src="https://example.com/mermaid.js"></script>"#));
        assert!(html.contains(r#"<div id="container"></div>"#));
    }

    #[test]
    fn test_render_script_escapes_arguments() {
        let script = render_script(
            "graph TD\n  A[\"quote\"]-->B",
            &json!({ "theme": "dark" }),
            None,
            "transparent",
        )
        .unwrap();

        assert!(script.contains(r#"container.textContent = "graph TD\n  A[\"quote\"]-->B";"#));
        assert!(script.contains(r#"{"theme":"dark"}"#));
        assert!(script.contains("const css = null;"));
        assert!(script.contains(r#"document.body.style.background = "transparent";"#));
    }
}
