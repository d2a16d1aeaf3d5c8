use accordion::{Accordion, AccordionItem, IconVariant};
use leptos::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="demo">
            <h1>"Accordion"</h1>

            <section>
                <h2>"Single open"</h2>
                <p>"Only one panel stays expanded; the second pre-expanded panel is closed on attach."</p>
                <Accordion>
                    <AccordionItem title="Shipping" open=true>
                        <p>"Orders ship within two business days."</p>
                    </AccordionItem>
                    <AccordionItem title="Returns">
                        <p>"Returns are accepted within 30 days."</p>
                    </AccordionItem>
                    <AccordionItem title="Warranty" open=true>
                        <p>"All products carry a one-year warranty."</p>
                    </AccordionItem>
                </Accordion>
            </section>

            <section>
                <h2>"Multiple open"</h2>
                <Accordion allow_multiple=true>
                    <AccordionItem title="First" open=true>
                        <p>"Expanded at load."</p>
                    </AccordionItem>
                    <AccordionItem title="Second">
                        <p>"Collapsed at load."</p>
                    </AccordionItem>
                    <AccordionItem title="Third" open=true>
                        <p>"Also expanded at load."</p>
                    </AccordionItem>
                </Accordion>
            </section>

            <section>
                <h2>"Icon variants"</h2>
                <Accordion>
                    <AccordionItem title="Plus/minus" icon=IconVariant::PlusMinus>
                        <p>"CSS owns the whole indicator animation."</p>
                    </AccordionItem>
                    <AccordionItem title="Left chevron" icon=IconVariant::LeftChevron>
                        <p>"Rotates from -90 degrees to 0 when opened."</p>
                    </AccordionItem>
                    <AccordionItem title="Down chevron" icon=IconVariant::DownChevron>
                        <p>"Rotates 180 degrees when opened."</p>
                    </AccordionItem>
                </Accordion>
            </section>
        </main>
    }
}
