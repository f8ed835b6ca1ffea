// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTML browsing page
//!
//! The page loads `/text?blocknum=N` and appends one table row per record.
//! Scrolling to the bottom requests the next page. Record text is inserted
//! with `textContent`, never as markup.

use alloy_primitives::BlockNumber;

const START_BLOCK_MARKER: &str = "__START_BLOCK__";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Strings on Ethereum</title>
<style>
body { margin: 0; font-family: sans-serif; }
.navbar { overflow: hidden; background-color: #444; position: fixed; top: 0; width: 100%; }
.navbar a, .navbar form { float: left; display: block; color: #f2f2f2; padding: 14px 16px; text-decoration: none; font-size: 17px; }
.navbar a:hover { background: #ddd; color: black; }
.main { padding: 16px; margin-top: 50px; }
td { padding: 4px 8px; vertical-align: top; }
td.text { white-space: pre-wrap; word-break: break-all; }
</style>
</head>
<body>
<div class="navbar">
  <a href="./">Home</a>
  <form action="start" method="GET">
    <input type="text" name="blocknum" inputmode="numeric">
    <input type="submit" value="strings in block">
  </form>
</div>
<div class="main">
<table border="1" id="text_table"></table>
</div>
<script>
var nextBlock = __START_BLOCK__;
var loading = false;

function link(href, label) {
  var a = document.createElement("a");
  a.href = href;
  a.textContent = label;
  return a;
}

function load() {
  if (loading) { return; }
  loading = true;
  fetch("text?blocknum=" + nextBlock)
    .then(function (resp) { return resp.json(); })
    .then(function (blocks) {
      var table = document.getElementById("text_table");
      blocks.forEach(function (block) {
        block.Text.forEach(function (rec) {
          var row = table.insertRow(table.rows.length);
          row.insertCell(0).appendChild(link("https://etherscan.io/block/" + block.BlockNum, "Block " + block.BlockNum));
          row.insertCell(1).appendChild(link("https://etherscan.io/tx/" + rec.Txn, "txn " + rec.Txn.slice(0, 6) + "..." + rec.Txn.slice(-4)));
          var cell = row.insertCell(2);
          cell.className = "text";
          cell.textContent = rec.Text;
        });
        nextBlock = block.BlockNum + 1;
      });
      if (blocks.length === 0) { nextBlock = nextBlock + 1; }
    })
    .finally(function () { loading = false; });
}

window.addEventListener("scroll", function () {
  if (window.innerHeight + window.pageYOffset >= document.body.offsetHeight - 2) {
    load();
  }
});

load();
</script>
</body>
</html>
"#;

/// Renders the browsing page starting at `start_block`
pub(crate) fn render(start_block: BlockNumber) -> String {
    TEMPLATE.replace(START_BLOCK_MARKER, &start_block.to_string())
}
