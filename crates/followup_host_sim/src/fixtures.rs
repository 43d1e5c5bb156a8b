//! Page skeletons modelled on real chat composers.
//!
//! `data-sim-role` marks the nodes the simulator drives; the engine never
//! looks at it. `data-rect` is `x y width height`.

/// Plain `<textarea>` composer with test ids; stop control beside the form.
pub const TEXTAREA_FIXTURE: &str = r#"<!DOCTYPE html>
<html><body>
<main>
  <div class="composer-shell">
    <form data-sim-role="form">
      <textarea id="prompt-textarea" data-sim-role="composer" data-rect="100 640 640 56"></textarea>
      <button type="button" aria-label="Attach files" data-rect="60 650 32 32">+</button>
      <button data-testid="send-button" data-sim-role="send" aria-label="Send prompt" data-rect="748 650 36 36"></button>
    </form>
    <button data-testid="stop-button" data-sim-role="stop" aria-label="Stop streaming" data-rect="748 650 36 36"></button>
  </div>
</main>
</body></html>"#;

/// Rich editable composer, French labels, controls outside the composer subtree.
///
/// The hidden zero-size textarea carries the preferred id and must be skipped.
pub const RICH_FIXTURE: &str = r#"<!DOCTYPE html>
<html><body>
<main>
  <form data-sim-role="form">
    <textarea id="prompt-textarea" data-rect="0 0 0 0"></textarea>
    <div class="ProseMirror" contenteditable="true" data-sim-role="composer" data-rect="120 600 600 48"><p data-sim-role="paragraph"></p></div>
  </form>
</main>
<aside>
  <button data-sim-role="send" aria-label="Envoyer le message" data-rect="730 606 36 36">↑</button>
  <button data-sim-role="stop" aria-label="Arrêter la génération" data-rect="730 606 36 36">■</button>
</aside>
</body></html>"#;
