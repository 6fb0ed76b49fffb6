use crate::article::{Article, ArticleContent, Category, Section};

fn section(heading: &str, body: &str) -> Section {
    Section {
        heading: heading.to_string(),
        body: body.to_string(),
    }
}

/// Hardcoded launch feed, installed on first start when no persisted state
/// exists. Every entry ships with a full body so the site works offline from
/// the first request.
pub fn initial_feed() -> Vec<Article> {
    vec![
        Article {
            id: "automacao-whatsapp-crm".to_string(),
            title: "Automação WhatsApp + CRM: Da Captação ao Fechamento em Piloto Automático"
                .to_string(),
            excerpt: "A estrutura oculta que integra o WhatsApp ao CRM, garantindo que nenhum \
                      lead seja perdido e reduzindo o tempo de resposta para menos de 5 minutos."
                .to_string(),
            author: "Manus AI".to_string(),
            date: "09 Dez".to_string(),
            read_time: "10 min leitura".to_string(),
            category: Category::MetodosRapidos,
            tags: vec![
                "Automação".to_string(),
                "WhatsApp".to_string(),
                "Vendas".to_string(),
            ],
            image_url:
                "https://images.unsplash.com/photo-1556740758-90de374c12ad?q=80&w=1200&auto=format&fit=crop"
                    .to_string(),
            is_premium: true,
            content: Some(ArticleContent {
                intro: "O WhatsApp é a principal ferramenta de comunicação na construção civil \
                        brasileira. No entanto, para a maioria das empresas, ele é um gargalo: \
                        leads chegam a todo momento, se perdem em conversas informais e o \
                        follow-up não acontece.\n\nEnquanto a maioria se afoga no caos do \
                        WhatsApp manual, os espertos estão rodando uma operação silenciosa que \
                        integra o WhatsApp ao CRM, garantindo que o lead certo chegue ao \
                        vendedor certo no momento exato.\n\nNeste conteúdo Premium Exclusivo, \
                        vamos revelar a Estrutura Oculta da Automação WhatsApp + CRM, passo a \
                        passo."
                    .to_string(),
                sections: vec![
                    section(
                        "O PROBLEMA REAL: O Gargalo da Velocidade",
                        "A dor do mercado é a perda de leads por demora. O método comum de \
                         gerenciar leads no WhatsApp de forma manual viola a regra de ouro da \
                         venda B2B: o primeiro a responder tem 70% de chance de fechar o \
                         negócio.\n\n1. **Perda de Oportunidade:** o lead que entra fora do \
                         horário comercial é perdido.\n2. **Falta de Histórico:** a conversa \
                         fica no celular do vendedor, e não no CRM.\n3. **Tempo Desperdiçado:** \
                         o vendedor gasta tempo qualificando leads frios.\n\n**Dados e \
                         Contexto:** empresas que implementaram a automação reduziram o tempo \
                         médio de resposta de 2 horas para menos de 5 minutos, com aumento de \
                         340% na taxa de agendamento.",
                    ),
                    section(
                        "O SISTEMA/MÉTODO: O Funil de Automação em 3 Etapas",
                        "O segredo é usar o WhatsApp como porta de entrada e o CRM como motor \
                         de qualificação e follow-up.\n\n**Pilares Principais:**\n1. \
                         **Atendimento Imediato (Chatbot):** responde na hora e qualifica o \
                         lead com 3 perguntas.\n2. **Integração CRM:** o lead qualificado é \
                         cadastrado automaticamente.\n3. **Follow-up Automático:** o CRM \
                         dispara a sequência de mensagens.",
                    ),
                    section(
                        "APLICAÇÃO PRÁTICA: Passo a Passo Detalhado e Operacional",
                        "Este conteúdo é exclusivo para membros premium. O restante do artigo \
                         detalha o passo a passo de implementação, incluindo os scripts do \
                         chatbot, a configuração da integração e os templates de follow-up.\n\n\
                         **1. Configuração do Chatbot:** fluxo de qualificação com 3 \
                         perguntas.\n**2. Integração CRM:** mapeamento dos campos.\n**3. \
                         Follow-up Automático:** sequência de 3 mensagens.",
                    ),
                ],
                conclusion: "Você tem a escolha: continuar perdendo leads no caos do WhatsApp \
                             ou construir uma Máquina Previsível de vendas com a Automação \
                             WhatsApp + CRM.\n\nRecapitulação do Valor Entregue: a chave é a \
                             velocidade, a qualificação e o follow-up automático."
                    .to_string(),
            }),
        },
        Article {
            id: "google-meu-negocio-otimizacao".to_string(),
            title: "Google Meu Negócio: 5 Otimizações que Dobram Leads Orgânicos (O Rombo que \
                    o Mercado Ignora)"
                .to_string(),
            excerpt: "A estrutura oculta para transformar seu perfil no Google em uma máquina \
                      previsível de leads orgânicos e qualificados, sem gastar um centavo em \
                      anúncios."
                .to_string(),
            author: "Manus AI".to_string(),
            date: "09 Dez".to_string(),
            read_time: "5 min leitura".to_string(),
            category: Category::HacksDeMarketing,
            tags: vec![
                "Google Meu Negócio".to_string(),
                "SEO Local".to_string(),
                "Orgânico".to_string(),
            ],
            image_url:
                "https://images.unsplash.com/photo-1543269865-cbf427effbad?q=80&w=1200&auto=format&fit=crop"
                    .to_string(),
            is_premium: true,
            content: Some(ArticleContent {
                intro: "A maioria das construtoras e prestadores de serviço tem um perfil no \
                        Google Meu Negócio incompleto ou desatualizado. O resultado é que o \
                        cliente que busca por \"construtora perto de mim\" encontra o \
                        concorrente.\n\nO rombo que o mercado ignora é que 90% dos leads \
                        locais vêm de buscas orgânicas, e não de anúncios. Neste artigo, vamos \
                        revelar as 5 otimizações que dobram seus leads orgânicos."
                    .to_string(),
                sections: vec![
                    section(
                        "O PROBLEMA REAL: O Perfil Incompleto",
                        "A dor do mercado é a perda de visibilidade local. O perfil genérico \
                         não funciona porque o Google prioriza relevância, distância e \
                         proeminência.\n\n1. **Falta de Relevância:** o perfil não usa as \
                         palavras-chave que o cliente busca.\n2. **Falta de Proeminência:** \
                         poucas avaliações e fotos ruins.\n3. **Falta de CTA:** o cliente não \
                         sabe o que fazer depois de encontrar o perfil.",
                    ),
                    section(
                        "O SISTEMA/MÉTODO: O Protocolo de Otimização Local",
                        "O segredo é tratar o perfil como uma landing page de alta \
                         conversão.\n\n**Pilares Principais:**\n1. **Palavras-Chave:** nome do \
                         serviço e localização no título e na descrição.\n2. **Prova Social:** \
                         coleta ativa de avaliações 5 estrelas.\n3. **Conteúdo Visual:** fotos \
                         de alta qualidade da equipe e das obras.",
                    ),
                    section(
                        "APLICAÇÃO PRÁTICA: As 5 Otimizações Cirúrgicas",
                        "Você pode implementar estas otimizações em menos de 1 hora:\n\n**1. \
                         Nome do Perfil:** inclua o serviço principal.\n**2. Categorias:** use \
                         a mais específica.\n**3. Descrição:** liste serviços e áreas de \
                         atendimento.\n**4. Postagens Semanais:** promoções e cases.\n**5. \
                         Resposta às Avaliações:** responda a todas.\n\n**Exemplo Concreto:** \
                         uma marmoraria em Campinas dobrou o número de chamadas em 60 dias \
                         apenas com essas otimizações.",
                    ),
                ],
                conclusion: "O Google Meu Negócio é o seu atalho para o cliente com intenção \
                             de compra imediata.\n\nRecapitulação do Valor Entregue: \
                             palavras-chave, prova social e conteúdo visual dobram seus leads \
                             orgânicos."
                    .to_string(),
            }),
        },
        Article {
            id: "otimizacao-tributaria-prestadores".to_string(),
            title: "Otimização Tributária para Prestadores: Economize 40% [Com Contador]"
                .to_string(),
            excerpt: "A estrutura oculta para prestadores de serviço reduzirem a carga \
                      tributária em até 40% e aumentarem a margem de lucro."
                .to_string(),
            author: "Manus AI".to_string(),
            date: "09 Dez".to_string(),
            read_time: "10 min leitura".to_string(),
            category: Category::Contingencia,
            tags: vec![
                "Tributação".to_string(),
                "Simples Nacional".to_string(),
                "Gestão Financeira".to_string(),
            ],
            image_url:
                "https://images.unsplash.com/photo-1554224155-984063f56750?q=80&w=1200&auto=format&fit=crop"
                    .to_string(),
            is_premium: true,
            content: Some(ArticleContent {
                intro: "A maioria dos prestadores de serviço na construção civil opera no \
                        regime tributário errado. Pagam impostos demais por medo da \
                        fiscalização ou por falta de conhecimento, deixando de lado uma \
                        economia de até 40% na carga tributária.\n\nA verdade que ninguém \
                        conta é que o regime tributário não é uma escolha estática. Neste \
                        conteúdo Premium Exclusivo, o passo a passo para reduzir a carga em \
                        parceria com seu contador."
                    .to_string(),
                sections: vec![
                    section(
                        "O PROBLEMA REAL: O Regime Tributário Errado",
                        "A dor do mercado é a carga tributária excessiva. Escolher o regime \
                         por \"achismo\" não funciona.\n\n1. **MEI vs. Simples Nacional vs. \
                         Lucro Presumido:** falta de análise na migração.\n2. **Fator R:** \
                         muitos ignoram que podem reduzir a alíquota de 15,5% para 6% no \
                         Simples Nacional.\n3. **Falta de Planejamento:** despreparo para a \
                         mudança de regime.",
                    ),
                    section(
                        "O SISTEMA/MÉTODO: O Protocolo do Fator R",
                        "O segredo para a maioria dos prestadores no Simples Nacional é o \
                         Fator R.\n\n**Pilares Principais:**\n1. **Fator R:** se a folha de \
                         pagamento for >= 28% da receita, a empresa migra para o Anexo III \
                         (6%).\n2. **Pró-Labore Estratégico:** ajuste fino para atingir os \
                         28%.\n3. **Contador Estratégico:** essencial para a execução correta.",
                    ),
                    section(
                        "APLICAÇÃO PRÁTICA: O Cálculo e a Estratégia",
                        "Este conteúdo é exclusivo para membros premium. O restante do artigo \
                         detalha o cálculo exato do Fator R, a estratégia de pró-labore e o \
                         checklist para o contador.\n\n**1. O Cálculo:** (Folha / Receita) >= \
                         28%.\n**2. Pró-Labore:** valor exato formalizado no contrato \
                         social.\n**3. Checklist:** verificação de CNAE e acompanhamento \
                         mensal.",
                    ),
                ],
                conclusion: "Você tem a escolha: continuar pagando impostos demais ou \
                             construir uma Máquina Previsível de economia.\n\nRecapitulação do \
                             Valor Entregue: o Fator R é a chave para reduzir a carga \
                             tributária em até 40%."
                    .to_string(),
            }),
        },
        Article {
            id: "case-reforma-150k".to_string(),
            title: "Case Completo: R$0 a R$150k/mês em Reformas [Passo a Passo Detalhado]"
                .to_string(),
            excerpt: "A Autópsia Completa da Operação Silenciosa que permitiu uma empresa de \
                      reformas sair do zero e atingir R$150k/mês em 90 dias."
                .to_string(),
            author: "Manus AI".to_string(),
            date: "09 Dez".to_string(),
            read_time: "15 min leitura".to_string(),
            category: Category::EstudosDeCaso,
            tags: vec![
                "Reformas".to_string(),
                "Escala".to_string(),
                "Gestão".to_string(),
            ],
            image_url:
                "https://images.unsplash.com/photo-1581094794329-cd1096d7a43f?q=80&w=1200&auto=format&fit=crop"
                    .to_string(),
            is_premium: true,
            content: Some(ArticleContent {
                intro: "A maioria das empresas de reforma vive de indicações esporádicas e \
                        orçamentos que nunca fecham. O empreendedor se sente um bombeiro, \
                        apagando incêndios operacionais sem tempo para estruturar o \
                        negócio.\n\nEnquanto isso, uma empresa de reformas em Curitiba rodou \
                        uma operação silenciosa que a levou de R$0 a R$150k/mês em apenas 90 \
                        dias. Eles tinham um sistema validado — e é a autópsia dele que você \
                        vai ler aqui."
                    .to_string(),
                sections: vec![
                    section(
                        "O PROBLEMA INICIAL: O Caos da Reforma",
                        "**Contexto:** empresa de pequeno porte, 3 sócios e 5 funcionários, \
                         dependência total de indicações. Faturamento inconstante (média de \
                         R$30k/mês, com vales de R$10k) e R$5.000 disponíveis para \
                         marketing.\n\nA dor era a imprevisibilidade: o sócio comercial \
                         gastava 80% do tempo em orçamentos que não fechavam, com CAC \
                         altíssimo disfarçado no tempo perdido.",
                    ),
                    section(
                        "ESTRATÉGIA APLICADA: O Funil de Qualificação Cirúrgica",
                        "A estratégia foi qualificação imediata para eliminar leads \
                         frios.\n\n1. **Atração Focada (Meta Ads):** anúncios de \"Reforma de \
                         Apartamento\" para público de alto poder aquisitivo.\n2. **Isca de \
                         Valor Qualificadora:** um \"Diagnóstico de Viabilidade de Reforma\" \
                         com 7 perguntas obrigatórias (tamanho, budget, timeline).\n3. \
                         **Velocidade e CRM:** regra de ligar em menos de 5 minutos para cada \
                         lead qualificado.",
                    ),
                    section(
                        "IMPLEMENTAÇÃO: O Ritual de 90 Dias",
                        "Este conteúdo é exclusivo para membros premium. O restante do artigo \
                         detalha os templates de anúncios, o formulário de qualificação e a \
                         configuração do CRM.\n\n- **Semana 1-2:** estrutura de BM, pixel e \
                         CRM.\n- **Semana 3-4:** primeira campanha (R$1.500) otimizada para \
                         Lead Qualificado.\n- **Mês 2:** otimização do CPL de R$60 para \
                         R$45.\n- **Mês 3:** escala para R$4.000/mês com o funil validado.",
                    ),
                    section(
                        "NÚMEROS REAIS: A Máquina Previsível em Ação",
                        "Este conteúdo é exclusivo para membros premium. As métricas \
                         exatas:\n\n- **Investimento inicial:** R$5.000.\n- **CAC final:** \
                         R$200.\n- **Vendas geradas:** 5 projetos/mês.\n- **Faturamento:** \
                         R$150.000/mês.\n- **ROI:** 30x.\n- **Payback:** 21 dias.",
                    ),
                ],
                conclusion: "O case de R$0 a R$150k/mês prova que a previsibilidade não é um \
                             luxo, mas o resultado de um sistema validado.\n\nRecapitulação do \
                             Valor Entregue: Atração Focada, Isca de Valor Qualificadora e \
                             Velocidade no Fechamento, orquestradas por um CRM."
                    .to_string(),
            }),
        },
        Article {
            id: "arquitetos-captacao".to_string(),
            title: "A Verdade Que Ninguém Conta: Como Arquitetos Podem Captar 3-5 Clientes/Mês \
                    sem Depender de Indicações"
                .to_string(),
            excerpt: "Estrutura oculta revelada para arquitetos e designers de interiores que \
                      querem construir uma máquina previsível de projetos, ignorando o ciclo \
                      vicioso da indicação."
                .to_string(),
            author: "Manus AI".to_string(),
            date: "09 Dez".to_string(),
            read_time: "8 min leitura".to_string(),
            category: Category::MetodosRapidos,
            tags: vec![
                "Arquitetura".to_string(),
                "Vendas".to_string(),
                "Captação".to_string(),
            ],
            image_url:
                "https://images.unsplash.com/photo-1503387762-592deb58ef4e?q=80&w=1200&auto=format&fit=crop"
                    .to_string(),
            is_premium: true,
            content: Some(ArticleContent {
                intro: "A maioria dos arquitetos vive na montanha-russa da indicação: um mês a \
                        agenda está lotada, no outro o telefone não toca.\n\nO rombo que o \
                        mercado ignora é simples: indicação não é estratégia, é bônus. Se você \
                        não tem um método ativo e controlável de geração de demanda, você não \
                        tem um negócio, tem um hobby caro.\n\nA promessa é clara: você sairá \
                        daqui com a visão exata de como construir seu próprio funil de vendas."
                    .to_string(),
                sections: vec![
                    section(
                        "O PROBLEMA REAL: A Falsa Segurança da Indicação",
                        "A dor do mercado é a previsibilidade zero. O método 100% indicação \
                         viola o princípio fundamental de qualquer negócio escalável: o \
                         controle.\n\n1. **Falta de Controle:** você não controla quando nem \
                         quem chega.\n2. **Sazonalidade Extrema:** a receita oscila \
                         drasticamente.\n3. **Baixa Margem:** leads de indicação esperam \
                         desconto de amigo.\n4. **CAC Oculto:** disfarçado em networking \
                         improdutivo e almoços caros.",
                    ),
                    section(
                        "O SISTEMA/MÉTODO: O Funil de Vendas do Arquiteto Esperto",
                        "O segredo não é fazer mais marketing, mas o marketing \
                         certo.\n\n**Pilares Principais:**\n1. **Atração:** tráfego pago para \
                         quem tem o problema que você resolve.\n2. **Conversão:** isca \
                         digital de alto valor.\n3. **Qualificação:** quiz ou formulário que \
                         separa curiosos de clientes.\n4. **Fechamento:** energia só nos \
                         leads pré-qualificados.",
                    ),
                    section(
                        "APLICAÇÃO PRÁTICA: A Tática Acionável Básica",
                        "Comece com a Oferta de Diagnóstico Gratuito Qualificado.\n\n1. \
                         **Crie uma Isca de Valor:** PDF \"Os 5 Erros Mais Caros ao Contratar \
                         um Arquiteto\".\n2. **Anúncio Simples (Meta Ads):** público de \
                         proprietários na sua região.\n3. **Página de Captura:** dados em \
                         troca do material.\n4. **Qualificação Imediata:** convite para \
                         diagnóstico de 15 minutos.",
                    ),
                ],
                conclusion: "Você acabou de ver a visão geral do sistema que tira arquitetos \
                             da dependência da indicação.\n\nRecapitulação do Valor Entregue: \
                             a previsibilidade não é um luxo. O método é simples: atrair, \
                             converter, qualificar e fechar."
                    .to_string(),
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_feed_is_well_formed() {
        let feed = initial_feed();
        assert!(!feed.is_empty());

        let mut ids: Vec<&str> = feed.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), feed.len(), "seed ids must be unique");

        for article in &feed {
            let content = article.content.as_ref().expect("seed articles ship bodies");
            assert!(!content.intro.is_empty());
            assert!(content.sections.len() >= 2);
            assert!(!content.conclusion.is_empty());
        }
    }
}
